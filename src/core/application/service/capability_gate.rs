use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult},
    value_object::ElevationPolicy,
};
use std::fmt;
use tracing::warn;

/// Operations that need [`ElevationPolicy::Elevated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegedOperation {
    /// Running a command inside a guest through its agent.
    GuestCommand,
}

impl fmt::Display for PrivilegedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegedOperation::GuestCommand => f.write_str("guest command"),
        }
    }
}

/// Refuses privileged operations unless the gateway was configured with
/// elevation enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityGate {
    policy: ElevationPolicy,
}

impl CapabilityGate {
    pub fn new(policy: ElevationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ElevationPolicy {
        self.policy
    }

    /// # Errors
    /// Returns [`ProxmoxError::PermissionDenied`] when the policy is restricted.
    pub fn authorize(&self, operation: PrivilegedOperation) -> ProxmoxResult<()> {
        match self.policy {
            ElevationPolicy::Elevated => Ok(()),
            ElevationPolicy::Restricted => {
                warn!(%operation, "refused privileged operation");
                Err(ProxmoxError::PermissionDenied(
                    "Elevated operations are disabled. Set PROXMOX_ALLOW_ELEVATED=true to enable."
                        .to_string(),
                ))
            }
        }
    }
}
