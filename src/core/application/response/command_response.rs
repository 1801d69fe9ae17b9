use crate::core::domain::model::guest::GuestKind;
use serde::Serialize;

/// Marker reported for every dispatched command.
pub const COMMAND_SUCCESS: &str = "SUCCESS";

/// Outcome of a guest-agent command, echoing what was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub status: String,
    pub command: String,
    pub node: String,
    pub vmid: String,
    #[serde(rename = "type")]
    pub kind: GuestKind,
    pub output: String,
}
