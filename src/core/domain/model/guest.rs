//! Domain models for guests (QEMU virtual machines and LXC containers).

use crate::core::domain::{error::ValidationError, value_object::serde_helpers};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two guest kinds a PVE node hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    /// A QEMU/KVM virtual machine.
    #[default]
    Qemu,
    /// An LXC container.
    Lxc,
}

impl GuestKind {
    pub const ALL: [GuestKind; 2] = [GuestKind::Qemu, GuestKind::Lxc];

    /// The upstream path segment for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestKind::Qemu => "qemu",
            GuestKind::Lxc => "lxc",
        }
    }
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuestKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "qemu" => Ok(GuestKind::Qemu),
            "lxc" => Ok(GuestKind::Lxc),
            other => Err(ValidationError::Field {
                field: "type".to_string(),
                message: format!("Unknown guest type '{}'. Expected qemu or lxc", other),
            }),
        }
    }
}

/// Which guest kinds a cluster-wide listing should query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestKindFilter {
    /// Both `qemu` and `lxc`.
    #[default]
    All,
    Only(GuestKind),
}

impl GuestKindFilter {
    /// The kinds to fetch, in fetch order.
    pub fn kinds(&self) -> Vec<GuestKind> {
        match self {
            GuestKindFilter::All => GuestKind::ALL.to_vec(),
            GuestKindFilter::Only(kind) => vec![*kind],
        }
    }
}

impl From<GuestKind> for GuestKindFilter {
    fn from(kind: GuestKind) -> Self {
        GuestKindFilter::Only(kind)
    }
}

impl FromStr for GuestKindFilter {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" | "all" => Ok(GuestKindFilter::All),
            other => other.parse::<GuestKind>().map(GuestKindFilter::Only),
        }
    }
}

/// A guest record as returned by `/nodes/{node}/{qemu|lxc}` and
/// `/nodes/{node}/{qemu|lxc}/{vmid}/status/current`.
///
/// Both endpoints share these counters; any of them may be absent depending
/// on guest kind and run state.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GuestRecord {
    /// Guest id; kept as text so large ids survive decoding exactly.
    #[serde(default, deserialize_with = "serde_helpers::opt_id_string::deserialize")]
    pub vmid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Run status (e.g., "running", "stopped").
    #[serde(default)]
    pub status: Option<String>,
    /// CPU usage fraction (0.0 to 1.0).
    #[serde(default, deserialize_with = "serde_helpers::opt_f64::deserialize")]
    pub cpu: Option<f64>,
    /// Number of allocated virtual CPUs.
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub cpus: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub mem: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub maxmem: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub diskread: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub diskwrite: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub netin: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub netout: Option<u64>,
    /// Uptime in seconds (if running).
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub uptime: Option<u64>,
}
