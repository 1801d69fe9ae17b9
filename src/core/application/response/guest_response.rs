use crate::core::domain::model::guest::GuestKind;
use serde::Serialize;

/// A normalized VM or container, identical in shape for both kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestView {
    /// Always a string, even when the upstream sent a number.
    pub vmid: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: GuestKind,
    pub node: String,
    pub status: String,
    pub uptime: String,
    pub cpu: String,
    pub memory: String,
    pub disk_read: String,
    pub disk_write: String,
    pub network_in: String,
    pub network_out: String,
}

impl GuestView {
    /// Numeric id used for ordering; ids that do not parse sort last.
    pub fn numeric_id(&self) -> u64 {
        self.vmid.parse::<u64>().unwrap_or(u64::MAX)
    }
}

/// A node/kind combination whose fetch failed during a cluster-wide listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchDiagnostic {
    pub node: String,
    #[serde(rename = "type")]
    pub kind: GuestKind,
    pub message: String,
}

/// Result of a cluster-wide guest listing: the merged, ordered guests plus
/// a diagnostic for every contributor that failed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestListing {
    pub guests: Vec<GuestView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<FetchDiagnostic>,
}

impl GuestListing {
    pub fn is_partial(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
