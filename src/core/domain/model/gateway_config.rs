//! Immutable gateway configuration, built once at startup.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    model::proxmox_connection::{DEFAULT_TIMEOUT, ProxmoxConnection},
    value_object::{
        DEFAULT_PORT, ElevationPolicy, ProxmoxApiToken, ProxmoxHost, ProxmoxPort, ProxmoxUrl,
        validate_api_token, validate_host, validate_port,
    },
};
use std::{fmt, time::Duration};

/// Everything the gateway core needs: how to reach the upstream and whether
/// privileged operations are allowed.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    connection: ProxmoxConnection,
    elevation: ElevationPolicy,
}

/// Raw, unvalidated settings gathered by the builder or the environment.
#[derive(Default, Clone)]
pub(crate) struct RawSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub token_name: Option<String>,
    pub token_value: Option<String>,
    pub verify_tls: bool,
    pub allow_elevated: bool,
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(connection: ProxmoxConnection, elevation: ElevationPolicy) -> Self {
        Self {
            connection,
            elevation,
        }
    }

    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    pub fn elevation(&self) -> ElevationPolicy {
        self.elevation
    }

    /// Loads `.env` (if present) and reads the `PROXMOX_*` variables.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Configuration` when a required variable is
    /// missing or unparseable, and `ProxmoxError::Validation` when a value is
    /// malformed.
    pub fn from_env() -> ProxmoxResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Builds the configuration from any key lookup (environment, map, ...).
    pub fn from_lookup<F>(lookup: F) -> ProxmoxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> ProxmoxResult<String> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    ProxmoxError::Configuration(format!(
                        "Missing required environment variable: {}",
                        key
                    ))
                })
        };
        let enabled = |key: &str| lookup(key).is_some_and(|value| value == "true");

        let port = match lookup("PROXMOX_PORT").filter(|v| !v.is_empty()) {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| {
                ProxmoxError::Configuration(format!("Invalid PROXMOX_PORT: '{}'", raw))
            })?),
            None => None,
        };
        let timeout = match lookup("PROXMOX_TIMEOUT_SECS").filter(|v| !v.is_empty()) {
            Some(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                ProxmoxError::Configuration(format!("Invalid PROXMOX_TIMEOUT_SECS: '{}'", raw))
            })?)),
            None => None,
        };

        RawSettings {
            host: Some(required("PROXMOX_HOST")?),
            port,
            user: Some(required("PROXMOX_USER")?),
            token_name: Some(required("PROXMOX_TOKEN_NAME")?),
            token_value: Some(required("PROXMOX_TOKEN_VALUE")?),
            verify_tls: enabled("PROXMOX_VERIFY_SSL"),
            allow_elevated: enabled("PROXMOX_ALLOW_ELEVATED"),
            timeout,
        }
        .validate()
    }
}

impl fmt::Debug for RawSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("token_name", &self.token_name)
            .field("token_value", &self.token_value.as_ref().map(|_| "<redacted>"))
            .field("verify_tls", &self.verify_tls)
            .field("allow_elevated", &self.allow_elevated)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RawSettings {
    /// Validates every field and assembles the immutable configuration.
    pub(crate) fn validate(self) -> ProxmoxResult<GatewayConfig> {
        let host = required_field(self.host, "host", "Host is required")?;
        validate_host(&host)?;
        let host = ProxmoxHost::new_unchecked(host);

        let port = self.port.unwrap_or(DEFAULT_PORT);
        validate_port(port)?;
        let port = ProxmoxPort::new_unchecked(port);

        let user = required_field(self.user, "user", "Token user is required")?;
        let token_name = required_field(self.token_name, "token_name", "Token name is required")?;
        let token_value =
            required_field(self.token_value, "token_value", "Token secret is required")?;
        validate_api_token(&user, &token_name, &token_value)?;
        let token = ProxmoxApiToken::new_unchecked(user, token_name, token_value);

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ValidationError::Field {
                field: "timeout".to_string(),
                message: "Timeout must be greater than zero".to_string(),
            }
            .into());
        }

        let url = ProxmoxUrl::from_parts(&host, &port)?;
        let connection = ProxmoxConnection::new(host, port, token, self.verify_tls, timeout, url);
        Ok(GatewayConfig::new(
            connection,
            ElevationPolicy::from_flag(self.allow_elevated),
        ))
    }
}

fn required_field(value: Option<String>, field: &str, message: &str) -> ProxmoxResult<String> {
    value.ok_or_else(|| {
        ValidationError::Field {
            field: field.to_string(),
            message: message.to_string(),
        }
        .into()
    })
}
