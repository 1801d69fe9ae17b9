use crate::core::domain::{
    error::ValidationError,
    value_object::{proxmox_host::ProxmoxHost, proxmox_port::ProxmoxPort},
};

const API_ROOT: &str = "api2/json";

/// The validated root of the upstream JSON API, e.g.
/// `https://pve.example.com:8006/api2/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(url::Url);

impl ProxmoxUrl {
    /// Builds the HTTPS API root for a host and port.
    pub(crate) fn from_parts(
        host: &ProxmoxHost,
        port: &ProxmoxPort,
    ) -> Result<Self, ValidationError> {
        let raw = format!("https://{}:{}/{}", host.as_str(), port.get(), API_ROOT);
        let url = url::Url::parse(&raw)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
        validate_url(&url)?;
        Ok(Self(url))
    }

    /// Wraps an arbitrary server root (scheme, host and port) without
    /// validation, appending the API path.
    #[cfg(test)]
    pub(crate) fn new_unchecked(server_root: &str) -> Self {
        let raw = format!("{}/{}", server_root.trim_end_matches('/'), API_ROOT);
        Self(url::Url::parse(&raw).expect("test server root is a valid URL"))
    }

    /// Joins an upstream path (e.g. `/nodes/pve1/qemu`) onto the API root.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validates that a URL is an HTTP(S) API root.
pub(crate) fn validate_url(url: &url::Url) -> Result<(), ValidationError> {
    if !matches!(url.scheme(), "https" | "http") {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Must be one of: https, http",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL must contain a host".to_string(),
        });
    }
    if url.path().trim_end_matches('/') != format!("/{}", API_ROOT) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid API path '{}'. Must be /{}",
            url.path(),
            API_ROOT
        )));
    }
    Ok(())
}
