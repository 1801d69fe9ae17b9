use serde::Serialize;

/// One entry of the node listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub node: String,
    pub status: String,
    pub uptime: String,
    pub cpu: String,
    pub memory: String,
}

/// Extended view of a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub node: String,
    pub status: String,
    pub uptime: String,
    pub cpu: String,
    /// Logical CPU count.
    pub cpus: u64,
    pub memory: String,
    pub swap: String,
    /// Root filesystem usage.
    pub disk: String,
    /// 1, 5 and 15 minute load averages.
    pub load: [f64; 3],
    pub kernel_release: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pve_version: Option<String>,
}
