//! The set of upstream calls the gateway core depends on.

use crate::core::domain::{
    error::ProxmoxResult,
    model::{
        cluster_status::ClusterStatusEntry,
        guest::{GuestKind, GuestRecord},
        node_list_item::NodeListItem,
        node_status::NodeStatus,
        storage_entry::StorageEntry,
    },
    value_object::{GuestId, NodeName},
};
use async_trait::async_trait;

/// One method per upstream endpoint. Each is a single call with no retry.
///
/// [`ApiClient`](super::api_client::ApiClient) is the HTTP implementation;
/// services only see this trait so they can share one client across
/// concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// `GET /nodes`
    async fn nodes(&self) -> ProxmoxResult<Vec<NodeListItem>>;

    /// `GET /nodes/{node}/status`
    async fn node_status(&self, node: &NodeName) -> ProxmoxResult<NodeStatus>;

    /// `GET /nodes/{node}/qemu`
    async fn qemu_guests(&self, node: &NodeName) -> ProxmoxResult<Vec<GuestRecord>>;

    /// `GET /nodes/{node}/lxc`
    async fn lxc_guests(&self, node: &NodeName) -> ProxmoxResult<Vec<GuestRecord>>;

    /// `GET /nodes/{node}/{kind}/{vmid}/status/current`
    async fn guest_status(
        &self,
        node: &NodeName,
        kind: GuestKind,
        vmid: GuestId,
    ) -> ProxmoxResult<GuestRecord>;

    /// `GET /storage`
    async fn storage(&self) -> ProxmoxResult<Vec<StorageEntry>>;

    /// `GET /storage/{storage}`
    async fn storage_entry(&self, storage: &str) -> ProxmoxResult<StorageEntry>;

    /// `GET /cluster/status`
    async fn cluster_status(&self) -> ProxmoxResult<Vec<ClusterStatusEntry>>;

    /// `GET /cluster/resources`, undecoded.
    async fn cluster_resources(&self) -> ProxmoxResult<serde_json::Value>;

    /// `POST /nodes/{node}/{kind}/{vmid}/agent/exec`
    async fn agent_exec(
        &self,
        node: &NodeName,
        kind: GuestKind,
        vmid: GuestId,
        command: &str,
    ) -> ProxmoxResult<serde_json::Value>;
}

/// Dispatches to the list endpoint for `kind`.
pub(crate) async fn guests_of_kind(
    api: &dyn UpstreamApi,
    node: &NodeName,
    kind: GuestKind,
) -> ProxmoxResult<Vec<GuestRecord>> {
    match kind {
        GuestKind::Qemu => api.qemu_guests(node).await,
        GuestKind::Lxc => api.lxc_guests(node).await,
    }
}
