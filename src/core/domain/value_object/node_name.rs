use crate::core::domain::error::ValidationError;
use std::fmt;

/// A cluster node name, safe to place in an upstream URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    /// Validates and wraps a node name.
    pub fn parse(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_node_name(&name)?;
        Ok(Self(name))
    }

    /// Creates a new node name without validation.
    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn validate_node_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Field {
            field: "node".to_string(),
            message: "Node name cannot be empty".to_string(),
        });
    }
    if name.len() > 253 {
        return Err(ValidationError::ConstraintViolation(
            "Node name exceeds maximum of 253 characters".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(ValidationError::Format(format!(
            "Node name '{}' contains invalid characters. Allowed: alphanumeric, -, .",
            name
        )));
    }
    // Dot segments ("." or "..") would be resolved away inside the URL path.
    let bounded_by_alphanumeric = name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric());
    if !bounded_by_alphanumeric {
        return Err(ValidationError::Format(format!(
            "Node name '{}' must start and end with an alphanumeric character",
            name
        )));
    }
    Ok(())
}
