//! Guest-agent command execution behind the capability gate.

use crate::core::{
    application::{
        response::command_response::{COMMAND_SUCCESS, CommandResult},
        service::capability_gate::{CapabilityGate, PrivilegedOperation},
    },
    domain::{
        error::{ProxmoxResult, ValidationError},
        model::guest::GuestKind,
        value_object::{GuestId, NodeName},
    },
    infrastructure::upstream_api::UpstreamApi,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// A command request as received from a caller, before validation.
#[derive(Debug, Clone, Copy)]
pub struct CommandRequest<'a> {
    pub node: &'a str,
    pub vmid: &'a str,
    pub command: Option<&'a str>,
    pub kind: GuestKind,
}

pub struct CommandService {
    api: Arc<dyn UpstreamApi>,
    gate: CapabilityGate,
}

impl CommandService {
    pub fn new(api: Arc<dyn UpstreamApi>, gate: CapabilityGate) -> Self {
        Self { api, gate }
    }

    /// Validates the request, consults the gate, then dispatches the command.
    ///
    /// Invalid input and a restricted policy both fail before the upstream is
    /// contacted. Input is checked first, so a blank command is a validation
    /// error even when the policy is restricted.
    ///
    /// # Errors
    /// * [`ProxmoxError::Validation`](crate::ProxmoxError::Validation) for a
    ///   missing command or a malformed node or guest id
    /// * [`ProxmoxError::PermissionDenied`](crate::ProxmoxError::PermissionDenied)
    ///   when elevation is disabled
    /// * [`ProxmoxError::Upstream`](crate::ProxmoxError::Upstream) when the
    ///   upstream rejects the command
    pub async fn execute(&self, request: CommandRequest<'_>) -> ProxmoxResult<CommandResult> {
        let command = request
            .command
            .map(str::trim)
            .filter(|command| !command.is_empty())
            .ok_or_else(|| ValidationError::Field {
                field: "command".to_string(),
                message: "Missing required field: command".to_string(),
            })?;
        let node = NodeName::parse(request.node)?;
        let vmid: GuestId = request.vmid.parse()?;

        self.gate.authorize(PrivilegedOperation::GuestCommand)?;

        info!(%node, %vmid, kind = %request.kind, "dispatching guest command");
        let payload = self
            .api
            .agent_exec(&node, request.kind, vmid, command)
            .await?;

        Ok(CommandResult {
            status: COMMAND_SUCCESS.to_string(),
            command: command.to_string(),
            node: node.to_string(),
            vmid: vmid.to_string(),
            kind: request.kind,
            output: render_output(&payload),
        })
    }
}

/// Human-readable output of an upstream command payload.
fn render_output(payload: &Value) -> String {
    match payload {
        Value::Null => "Command executed".to_string(),
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => payload.to_string(),
        },
        other => other.to_string(),
    }
}
