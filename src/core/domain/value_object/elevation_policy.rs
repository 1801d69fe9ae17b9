/// Process-wide switch for privileged operations.
///
/// Fixed when the gateway is configured; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevationPolicy {
    /// Privileged operations are refused.
    #[default]
    Restricted,
    /// Privileged operations proceed without further checks.
    Elevated,
}

impl ElevationPolicy {
    pub fn from_flag(allow_elevated: bool) -> Self {
        if allow_elevated {
            ElevationPolicy::Elevated
        } else {
            ElevationPolicy::Restricted
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, ElevationPolicy::Elevated)
    }
}
