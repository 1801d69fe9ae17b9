//! Domain model for node status from the `/nodes/{node}/status` endpoint.

use crate::core::domain::value_object::serde_helpers;
use serde::Deserialize;

/// Detailed status information for a Proxmox node.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    /// Node name, when the upstream echoes it.
    #[serde(default)]
    pub nodename: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// CPU usage fraction (0.0 to 1.0).
    #[serde(default, deserialize_with = "serde_helpers::opt_f64::deserialize")]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub memory: Option<UsageInfo>,
    #[serde(default)]
    pub swap: Option<UsageInfo>,
    /// Root filesystem usage.
    #[serde(default)]
    pub rootfs: Option<UsageInfo>,
    /// System uptime in seconds.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub uptime: Option<u64>,
    /// Kernel version string.
    #[serde(default)]
    pub kversion: Option<String>,
    /// Legacy kernel label some versions report.
    #[serde(default)]
    pub kernel: Option<String>,
    #[serde(default)]
    pub current_kernel: Option<KernelInfo>,
    /// Load average over 1, 5, and 15 minutes.
    #[serde(default, deserialize_with = "serde_helpers::opt_loadavg::deserialize")]
    pub loadavg: Option<[f64; 3]>,
    #[serde(default)]
    pub cpuinfo: Option<CpuInfo>,
    #[serde(default)]
    pub pveversion: Option<String>,
}

/// Used/total byte counters for memory, swap and filesystems.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UsageInfo {
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub used: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub free: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct KernelInfo {
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub sysname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CpuInfo {
    /// Logical CPU count.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub cpus: Option<u64>,
    #[serde(default)]
    pub model: Option<String>,
}
