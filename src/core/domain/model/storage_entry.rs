//! Domain model for storage pools from the `/storage` endpoint.

use crate::core::domain::value_object::serde_helpers;
use serde::Deserialize;

/// A storage pool definition with optional usage counters.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StorageEntry {
    /// Storage identifier (e.g., `local`, `nfs-backup`).
    #[serde(default)]
    pub storage: String,
    /// Storage plugin type (e.g., `dir`, `zfspool`, `lvmthin`).
    #[serde(default, rename = "type")]
    pub storage_type: Option<String>,
    /// Declared content types (`images`, `rootdir`, `iso`, ...).
    #[serde(default, deserialize_with = "serde_helpers::opt_list::deserialize")]
    pub content: Option<Vec<String>>,
    /// Nodes the pool is restricted to; absent means every node.
    #[serde(default, deserialize_with = "serde_helpers::opt_list::deserialize")]
    pub nodes: Option<Vec<String>>,
    /// Set when the pool is administratively disabled.
    #[serde(default, deserialize_with = "serde_helpers::opt_flag::deserialize")]
    pub disable: Option<bool>,
    #[serde(default, deserialize_with = "serde_helpers::opt_flag::deserialize")]
    pub enabled: Option<bool>,
    /// Used space in bytes.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub used: Option<u64>,
    /// Total capacity in bytes.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub total: Option<u64>,
}

impl StorageEntry {
    /// Whether the pool may be shown to clients at all.
    pub fn is_surfaceable(&self) -> bool {
        let disabled = self.disable.unwrap_or(false);
        let has_content = self.content.as_ref().is_some_and(|c| !c.is_empty());
        !disabled && has_content
    }

    /// Whether the pool is usable from `node`. Pools without node affinity
    /// are available everywhere.
    pub fn is_available_on(&self, node: &str) -> bool {
        match &self.nodes {
            Some(nodes) if !nodes.is_empty() => nodes.iter().any(|n| n == node),
            _ => true,
        }
    }
}
