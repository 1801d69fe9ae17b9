//! Domain model for node list items from the `/nodes` endpoint.

use crate::core::domain::value_object::serde_helpers;
use serde::Deserialize;

/// A node in the Proxmox cluster, as returned by `/api2/json/nodes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeListItem {
    /// The node name (e.g., "pve1").
    pub node: String,
    /// Current node status (e.g., "online", "offline", "unknown").
    #[serde(default)]
    pub status: Option<String>,
    /// CPU usage fraction (0.0 to 1.0).
    #[serde(default, deserialize_with = "serde_helpers::opt_f64::deserialize")]
    pub cpu: Option<f64>,
    /// Number of logical CPUs.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub maxcpu: Option<u64>,
    /// Memory usage in bytes.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub mem: Option<u64>,
    /// Maximum memory in bytes.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub maxmem: Option<u64>,
    /// Root disk usage in bytes.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub disk: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub maxdisk: Option<u64>,
    /// System uptime in seconds.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub uptime: Option<u64>,
    /// Unique node identifier (e.g., "node/pve1").
    #[serde(default)]
    pub id: Option<String>,
}
