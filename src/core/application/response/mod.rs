//! The stable output schema handed to the HTTP surface.
//!
//! Field names serialize in camelCase. Optional counters are rendered as
//! `"N/A"` rather than omitted so every record of a kind has the same shape.

pub mod cluster_health_response;
pub mod command_response;
pub mod guest_response;
pub mod node_response;
pub mod storage_response;
