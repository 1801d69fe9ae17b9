use crate::core::domain::value_object::{
    ProxmoxApiToken, ProxmoxHost, ProxmoxPort, ProxmoxUrl,
};
use std::time::Duration;

/// Default bound on a single upstream request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed per-process details for reaching the upstream API.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    proxmox_host: ProxmoxHost,
    proxmox_port: ProxmoxPort,
    api_token: ProxmoxApiToken,
    verify_tls: bool,
    timeout: Duration,
    proxmox_url: ProxmoxUrl,
}

impl ProxmoxConnection {
    pub fn new(
        proxmox_host: ProxmoxHost,
        proxmox_port: ProxmoxPort,
        api_token: ProxmoxApiToken,
        verify_tls: bool,
        timeout: Duration,
        proxmox_url: ProxmoxUrl,
    ) -> Self {
        Self {
            proxmox_host,
            proxmox_port,
            api_token,
            verify_tls,
            timeout,
            proxmox_url,
        }
    }

    pub fn proxmox_host(&self) -> &ProxmoxHost {
        &self.proxmox_host
    }

    pub fn proxmox_port(&self) -> &ProxmoxPort {
        &self.proxmox_port
    }

    pub fn api_token(&self) -> &ProxmoxApiToken {
        &self.api_token
    }

    /// Whether upstream TLS certificates are verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn proxmox_url(&self) -> &ProxmoxUrl {
        &self.proxmox_url
    }
}
