pub mod cluster_status;
pub mod gateway_config;
pub mod guest;
pub mod node_list_item;
pub mod node_status;
pub mod proxmox_connection;
pub mod storage_entry;
