//! HTTP client for the PVE JSON API, authenticated with a static API token.

use crate::core::{
    domain::{
        error::{ProxmoxError, ProxmoxResult, UpstreamError},
        model::{
            cluster_status::ClusterStatusEntry,
            guest::{GuestKind, GuestRecord},
            node_list_item::NodeListItem,
            node_status::NodeStatus,
            proxmox_connection::ProxmoxConnection,
            storage_entry::StorageEntry,
        },
        value_object::{GuestId, NodeName},
    },
    infrastructure::upstream_api::UpstreamApi,
};
use async_trait::async_trait;
use reqwest::{
    Client, Method,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use tracing::debug;

/// Every PVE response wraps its payload in `{"data": ...}`.
#[derive(Deserialize)]
struct ApiResponse<T> {
    data: T,
}

/// Stateless HTTP client for the upstream API.
///
/// The API token is installed as a default `Authorization` header, so the
/// client carries no per-call mutable state and one instance can be shared
/// across concurrent requests. Each call is a single attempt bounded by the
/// connection timeout; callers decide whether to retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    connection: ProxmoxConnection,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Configuration` if the token cannot be used as a
    /// header value or the HTTP client cannot be built.
    pub fn new(connection: ProxmoxConnection) -> ProxmoxResult<Self> {
        let mut auth_value =
            HeaderValue::from_str(&connection.api_token().as_authorization_header()).map_err(
                |_| ProxmoxError::Configuration("API token is not a valid header value".to_string()),
            )?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .danger_accept_invalid_certs(!connection.verify_tls())
            .timeout(connection.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ProxmoxError::Configuration(e.to_string()))?;

        Ok(Self {
            http_client,
            connection,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Performs a GET request and returns the decoded `data` field.
    pub async fn get<T>(&self, path: &str) -> ProxmoxResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute_request(Method::GET, path, None::<&()>).await
    }

    /// Performs a POST request with a JSON body and returns the decoded
    /// `data` field.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ProxmoxResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        self.execute_request(Method::POST, path, Some(body)).await
    }

    async fn execute_request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ProxmoxResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = self.connection.proxmox_url().endpoint(path);
        debug!(%method, path, "upstream request");

        let mut req_builder = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Failed to read response: {}", e)))?;
        debug!(%method, path, status = status.as_u16(), "upstream response");

        if !status.is_success() {
            let message = upstream_message(&bytes).unwrap_or_else(|| status.to_string());
            return Err(UpstreamError::from_status(status.as_u16(), message).into());
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Transport(format!("Failed to parse response: {}", e)))?;
        Ok(envelope.data)
    }
}

/// Pulls a human-readable message out of an error body, if it carries one.
fn upstream_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        let message = message.trim();
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }
    if let Some(data) = value.get("data").and_then(|d| d.as_str()) {
        if !data.trim().is_empty() {
            return Some(data.trim().to_string());
        }
    }
    let errors = value.get("errors")?.as_object()?;
    if errors.is_empty() {
        return None;
    }
    let parts: Vec<String> = errors
        .iter()
        .map(|(field, reason)| match reason.as_str() {
            Some(text) => format!("{}: {}", field, text.trim()),
            None => format!("{}: {}", field, reason),
        })
        .collect();
    Some(parts.join("; "))
}

#[async_trait]
impl UpstreamApi for ApiClient {
    async fn nodes(&self) -> ProxmoxResult<Vec<NodeListItem>> {
        self.get("/nodes").await
    }

    async fn node_status(&self, node: &NodeName) -> ProxmoxResult<NodeStatus> {
        self.get(&format!("/nodes/{}/status", node)).await
    }

    async fn qemu_guests(&self, node: &NodeName) -> ProxmoxResult<Vec<GuestRecord>> {
        self.get(&format!("/nodes/{}/qemu", node)).await
    }

    async fn lxc_guests(&self, node: &NodeName) -> ProxmoxResult<Vec<GuestRecord>> {
        self.get(&format!("/nodes/{}/lxc", node)).await
    }

    async fn guest_status(
        &self,
        node: &NodeName,
        kind: GuestKind,
        vmid: GuestId,
    ) -> ProxmoxResult<GuestRecord> {
        self.get(&format!("/nodes/{}/{}/{}/status/current", node, kind, vmid))
            .await
    }

    async fn storage(&self) -> ProxmoxResult<Vec<StorageEntry>> {
        self.get("/storage").await
    }

    async fn storage_entry(&self, storage: &str) -> ProxmoxResult<StorageEntry> {
        let mut url = url::Url::parse("http://localhost/storage/").map_err(|e| {
            ProxmoxError::Configuration(format!("Failed to build storage path: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| ProxmoxError::Configuration("Failed to build storage path".to_string()))?
            .pop_if_empty()
            .push(storage);
        self.get(url.path()).await
    }

    async fn cluster_status(&self) -> ProxmoxResult<Vec<ClusterStatusEntry>> {
        self.get("/cluster/status").await
    }

    async fn cluster_resources(&self) -> ProxmoxResult<serde_json::Value> {
        self.get("/cluster/resources").await
    }

    async fn agent_exec(
        &self,
        node: &NodeName,
        kind: GuestKind,
        vmid: GuestId,
        command: &str,
    ) -> ProxmoxResult<serde_json::Value> {
        let body = serde_json::json!({ "command": command });
        self.post(&format!("/nodes/{}/{}/{}/agent/exec", node, kind, vmid), &body)
            .await
    }
}
