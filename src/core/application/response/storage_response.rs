use serde::Serialize;

/// A storage pool that is enabled and declares at least one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageView {
    pub storage: String,
    /// Comma-joined node affinity, or `"all"`.
    pub nodes: String,
    #[serde(rename = "type")]
    pub storage_type: Option<String>,
    pub content: String,
    /// `"<used> / <total> (<pct>)"`.
    pub usage: String,
    /// Percentage with one decimal; `None` when the total is unknown (zero).
    pub usage_percent: Option<f64>,
    pub status: String,
    pub available: bool,
}
