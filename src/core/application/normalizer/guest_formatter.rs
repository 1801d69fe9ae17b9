use crate::core::{
    application::{
        normalizer::units::{
            NOT_AVAILABLE, format_byte_pair, format_bytes, format_fraction, format_uptime,
        },
        response::guest_response::GuestView,
    },
    domain::{
        model::guest::{GuestKind, GuestRecord},
        value_object::GuestId,
    },
};

/// Normalizes a guest record fetched from `node`.
///
/// `requested` supplies the id when the upstream record omits it (single
/// guest lookups).
pub fn format_guest(
    record: &GuestRecord,
    node: &str,
    kind: GuestKind,
    requested: Option<GuestId>,
) -> GuestView {
    let vmid = record
        .vmid
        .clone()
        .or_else(|| requested.map(|id| id.to_string()))
        .unwrap_or_default();

    GuestView {
        vmid,
        name: record.name.clone(),
        kind,
        node: node.to_string(),
        status: record
            .status
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        uptime: record
            .uptime
            .map(format_uptime)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        cpu: format_fraction(record.cpu),
        memory: match record.maxmem {
            Some(total) => format_byte_pair(record.mem.unwrap_or(0), total),
            None => NOT_AVAILABLE.to_string(),
        },
        disk_read: optional_bytes(record.diskread),
        disk_write: optional_bytes(record.diskwrite),
        network_in: optional_bytes(record.netin),
        network_out: optional_bytes(record.netout),
    }
}

fn optional_bytes(bytes: Option<u64>) -> String {
    bytes
        .map(format_bytes)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
