use thiserror::Error;

/// The main error type for gateway operations.
///
/// Every failure surfaced to a caller is one of these variants. Messages are
/// built by the layer that detected the failure, and upstream messages are
/// carried verbatim inside [`UpstreamError`].
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// The upstream API answered with a non-success status, or the call never
    /// completed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// A privileged operation was attempted while elevation is disabled.
    ///
    /// # Fields
    /// * `0` - Why the operation was refused
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A caller-supplied input failed validation before any upstream call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The gateway could not be configured (missing settings, unbuildable
    /// HTTP client).
    ///
    /// # Fields
    /// * `0` - A description of the configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProxmoxError {
    /// Returns true when the upstream reported the target as nonexistent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProxmoxError::Upstream(UpstreamError::NotFound { .. }))
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        ProxmoxError::Upstream(UpstreamError::NotFound {
            status: 404,
            message: message.into(),
        })
    }
}

/// Failures reported by, or on the way to, the upstream management API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// The upstream returned a non-success HTTP status.
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `message` - The upstream message, or the status line when absent
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The upstream signalled that the node, guest or storage does not exist.
    #[error("Not found ({status}): {message}")]
    NotFound { status: u16, message: String },

    /// Connection refused, timeout, or a body that could not be decoded.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Classifies a non-success response into `NotFound` or `Status`.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        if status == 404 || looks_like_missing_target(&message) {
            UpstreamError::NotFound { status, message }
        } else {
            UpstreamError::Status { status, message }
        }
    }

    /// The HTTP status code, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } | UpstreamError::NotFound { status, .. } => {
                Some(*status)
            }
            UpstreamError::Transport(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UpstreamError::Status { message, .. } | UpstreamError::NotFound { message, .. } => {
                message
            }
            UpstreamError::Transport(message) => message,
        }
    }
}

// PVE answers 500/595 for missing nodes and guests, so the text is the only signal.
fn looks_like_missing_target(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("does not exist") || lower.contains("no such")
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
