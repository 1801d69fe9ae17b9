mod elevation_policy;
mod guest_id;
mod node_name;
mod proxmox_api_token;
mod proxmox_host;
mod proxmox_port;
mod proxmox_uri;
pub(crate) mod serde_helpers;

pub use elevation_policy::ElevationPolicy;
pub use guest_id::GuestId;
pub use node_name::NodeName;
pub use proxmox_api_token::ProxmoxApiToken;
pub use proxmox_host::ProxmoxHost;
pub use proxmox_port::{DEFAULT_PORT, ProxmoxPort};
pub use proxmox_uri::ProxmoxUrl;

// Re-export validation functions for internal use
pub(crate) use proxmox_api_token::validate_api_token;
pub(crate) use proxmox_host::validate_host;
pub(crate) use proxmox_port::validate_port;
