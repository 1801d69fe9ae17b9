use crate::core::domain::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A guest identifier (`vmid`). Unique per cluster node, not across nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GuestId(u64);

impl GuestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GuestId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ValidationError::Field {
                field: "vmid".to_string(),
                message: "Guest id cannot be empty".to_string(),
            });
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Format(format!(
                "Guest id '{}' must be a decimal integer",
                value
            )));
        }
        value.parse::<u64>().map(Self).map_err(|_| {
            ValidationError::ConstraintViolation(format!("Guest id '{}' is out of range", value))
        })
    }
}
