use crate::core::{
    application::{
        normalizer::units::{NOT_AVAILABLE, format_byte_pair, usage_percent},
        response::storage_response::StorageView,
    },
    domain::model::storage_entry::StorageEntry,
};

/// Normalizes a storage pool. Disabled pools and pools without content types
/// are never surfaced and yield `None`.
pub fn format_storage(entry: &StorageEntry) -> Option<StorageView> {
    if !entry.is_surfaceable() {
        return None;
    }

    let used = entry.used.unwrap_or(0);
    let total = entry.total.unwrap_or(0);
    let percent = usage_percent(used, total);
    let rendered_percent = percent
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let nodes = match &entry.nodes {
        Some(nodes) if !nodes.is_empty() => nodes.join(", "),
        _ => "all".to_string(),
    };

    let status = match entry.enabled {
        Some(false) => "disabled",
        Some(true) | None => "enabled",
    };

    Some(StorageView {
        storage: entry.storage.clone(),
        nodes,
        storage_type: entry.storage_type.clone(),
        content: entry.content.as_deref().unwrap_or_default().join(","),
        usage: format!("{} ({})", format_byte_pair(used, total), rendered_percent),
        usage_percent: percent,
        status: status.to_string(),
        available: total > 0,
    })
}

/// Formats every surfaceable pool, keeping only those usable from
/// `node_filter` when one is given. Upstream order is preserved.
pub fn format_storage_list(entries: &[StorageEntry], node_filter: Option<&str>) -> Vec<StorageView> {
    entries
        .iter()
        .filter(|entry| node_filter.is_none_or(|node| entry.is_available_on(node)))
        .filter_map(format_storage)
        .collect()
}
