//! Pure transforms from upstream records to the output schema.

pub mod cluster_formatter;
pub mod guest_formatter;
pub mod node_formatter;
pub mod storage_formatter;
pub mod units;
