//! A normalizing gateway over the Proxmox VE management API.
//!
//! [`ProxmoxGateway`] authenticates with a static API token, fans guest
//! listings out across every cluster node, tolerates per-node failures, and
//! renders nodes, guests, storage pools and cluster health into a stable,
//! human-readable schema. Guest command execution is refused unless the
//! gateway was configured with elevation enabled.

mod core;

pub use crate::core::{
    application::{
        response::{
            cluster_health_response::{ClusterHealth, NodeHealth, QuorumView},
            command_response::{COMMAND_SUCCESS, CommandResult},
            guest_response::{FetchDiagnostic, GuestListing, GuestView},
            node_response::{NodeDetail, NodeSummary},
            storage_response::StorageView,
        },
        service::capability_gate::{CapabilityGate, PrivilegedOperation},
    },
    domain::{
        error::{ProxmoxError, ProxmoxResult, UpstreamError, ValidationError},
        model::{
            cluster_status::{ClusterEntry, ClusterNodeEntry, ClusterStatusEntry, QuorumEntry},
            gateway_config::GatewayConfig,
            guest::{GuestKind, GuestKindFilter, GuestRecord},
            node_list_item::NodeListItem,
            node_status::{CpuInfo, KernelInfo, NodeStatus, UsageInfo},
            proxmox_connection::ProxmoxConnection,
            storage_entry::StorageEntry,
        },
        value_object::{
            ElevationPolicy, GuestId, NodeName, ProxmoxApiToken, ProxmoxHost, ProxmoxPort,
            ProxmoxUrl,
        },
    },
    infrastructure::{api_client::ApiClient, upstream_api::UpstreamApi},
};

use crate::core::{
    application::{
        normalizer::{
            cluster_formatter::format_cluster_health,
            guest_formatter::format_guest,
            node_formatter::{format_node, format_node_detail},
            storage_formatter::{format_storage, format_storage_list},
        },
        service::{
            command_service::{CommandRequest, CommandService},
            guest_aggregator::GuestAggregator,
        },
    },
    domain::model::gateway_config::RawSettings,
};
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// The gateway core: every boundary operation the HTTP surface calls.
///
/// One instance is built at startup and shared; it holds no per-request
/// state, so `&self` methods may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use pve_gateway::{GuestKindFilter, ProxmoxGateway, ProxmoxResult};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let gateway = ProxmoxGateway::builder()
///         .host("pve.example.com")
///         .port(8006)
///         .api_token("monitor@pve", "dashboard", "00000000-0000-0000-0000-000000000000")
///         .verify_tls(true)
///         .build()?;
///
///     for node in gateway.nodes().await? {
///         println!("{} is {} (up {})", node.node, node.status, node.uptime);
///     }
///
///     let listing = gateway.list_guests(None, GuestKindFilter::All).await?;
///     for guest in &listing.guests {
///         println!("{} {} on {}", guest.vmid, guest.kind, guest.node);
///     }
///     Ok(())
/// }
/// ```
pub struct ProxmoxGateway {
    api: Arc<dyn UpstreamApi>,
    guests: GuestAggregator,
    commands: CommandService,
}

/// Builder for [`ProxmoxGateway`]. Values are validated in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ProxmoxGatewayBuilder {
    settings: RawSettings,
}

impl ProxmoxGatewayBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.settings.host = Some(host.into());
        self
    }

    /// Defaults to 8006 when not set.
    pub fn port(mut self, port: u16) -> Self {
        self.settings.port = Some(port);
        self
    }

    /// Sets the API token identity (`user@realm`, token name) and its secret.
    pub fn api_token(
        mut self,
        user: impl Into<String>,
        token_name: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.settings.user = Some(user.into());
        self.settings.token_name = Some(token_name.into());
        self.settings.token_value = Some(secret.into());
        self
    }

    /// Certificate verification is off unless enabled here.
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.settings.verify_tls = verify_tls;
        self
    }

    /// Allows privileged operations such as guest commands.
    pub fn allow_elevated(mut self, allow_elevated: bool) -> Self {
        self.settings.allow_elevated = allow_elevated;
        self
    }

    /// Per-request upstream timeout; defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    /// Validates the settings and builds the gateway.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` for a missing or malformed value and
    /// `ProxmoxError::Configuration` if the HTTP client cannot be built.
    pub fn build(self) -> ProxmoxResult<ProxmoxGateway> {
        ProxmoxGateway::from_config(self.settings.validate()?)
    }
}

impl ProxmoxGateway {
    pub fn builder() -> ProxmoxGatewayBuilder {
        ProxmoxGatewayBuilder::default()
    }

    /// Builds the gateway from an already validated configuration.
    pub fn from_config(config: GatewayConfig) -> ProxmoxResult<Self> {
        let client = ApiClient::new(config.connection().clone())?;
        debug!(
            url = config.connection().proxmox_url().as_str(),
            elevated = config.elevation().is_elevated(),
            "gateway configured"
        );
        Ok(Self::with_api(Arc::new(client), config.elevation()))
    }

    /// Reads `.env` and the `PROXMOX_*` environment variables.
    pub fn from_env() -> ProxmoxResult<Self> {
        Self::from_config(GatewayConfig::from_env()?)
    }

    /// Builds the gateway over any [`UpstreamApi`] implementation.
    pub fn with_api(api: Arc<dyn UpstreamApi>, elevation: ElevationPolicy) -> Self {
        Self {
            guests: GuestAggregator::new(Arc::clone(&api)),
            commands: CommandService::new(Arc::clone(&api), CapabilityGate::new(elevation)),
            api,
        }
    }

    /// Lists cluster nodes in upstream order.
    pub async fn nodes(&self) -> ProxmoxResult<Vec<NodeSummary>> {
        let nodes = self.api.nodes().await?;
        Ok(nodes.iter().map(format_node).collect())
    }

    /// Extended status of one node.
    ///
    /// # Errors
    /// A NotFound-flavored [`UpstreamError`] when the node does not exist.
    pub async fn node_detail(&self, node: &str) -> ProxmoxResult<NodeDetail> {
        let node = NodeName::parse(node)?;
        let status = self.api.node_status(&node).await?;
        Ok(format_node_detail(&node, &status))
    }

    /// Lists guests across the cluster, or on `node` only, sorted by numeric
    /// id. Per-node failures are reported in [`GuestListing::diagnostics`]
    /// instead of failing the call.
    pub async fn list_guests(
        &self,
        node: Option<&str>,
        kinds: GuestKindFilter,
    ) -> ProxmoxResult<GuestListing> {
        let node = node.map(NodeName::parse).transpose()?;
        self.guests.list(node.as_ref(), kinds).await
    }

    /// Current status of one guest. `kind` defaults to `qemu`.
    pub async fn guest_detail(
        &self,
        node: &str,
        vmid: &str,
        kind: Option<GuestKind>,
    ) -> ProxmoxResult<GuestView> {
        let node = NodeName::parse(node)?;
        let vmid: GuestId = vmid.parse()?;
        let kind = kind.unwrap_or_default();
        let record = self.api.guest_status(&node, kind, vmid).await?;
        Ok(format_guest(&record, node.as_str(), kind, Some(vmid)))
    }

    /// Runs `command` through the guest agent. `kind` defaults to `qemu`.
    ///
    /// # Errors
    /// * `ProxmoxError::Validation` if `command` is missing or blank
    /// * `ProxmoxError::PermissionDenied` unless elevation is enabled
    pub async fn execute_guest_command(
        &self,
        node: &str,
        vmid: &str,
        command: Option<&str>,
        kind: Option<GuestKind>,
    ) -> ProxmoxResult<CommandResult> {
        self.commands
            .execute(CommandRequest {
                node,
                vmid,
                command,
                kind: kind.unwrap_or_default(),
            })
            .await
    }

    /// Lists enabled storage pools with content, optionally only those
    /// available on `node`.
    pub async fn storage(&self, node: Option<&str>) -> ProxmoxResult<Vec<StorageView>> {
        let entries = self.api.storage().await?;
        Ok(format_storage_list(&entries, node))
    }

    /// One storage pool by name.
    ///
    /// # Errors
    /// NotFound when the pool does not exist, is disabled, or declares no
    /// content.
    pub async fn storage_detail(&self, storage: &str) -> ProxmoxResult<StorageView> {
        if storage.trim().is_empty() {
            return Err(ValidationError::Field {
                field: "storage".to_string(),
                message: "Storage name cannot be empty".to_string(),
            }
            .into());
        }
        let mut entry = self.api.storage_entry(storage).await?;
        if entry.storage.is_empty() {
            entry.storage = storage.to_string();
        }
        format_storage(&entry).ok_or_else(|| {
            ProxmoxError::not_found(format!(
                "Storage '{}' is disabled or has no content",
                storage
            ))
        })
    }

    pub async fn cluster_health(&self) -> ProxmoxResult<ClusterHealth> {
        let entries = self.api.cluster_status().await?;
        Ok(format_cluster_health(&entries))
    }

    /// The upstream cluster resource summary, passed through untouched.
    pub async fn cluster_resources(&self) -> ProxmoxResult<serde_json::Value> {
        self.api.cluster_resources().await
    }
}
