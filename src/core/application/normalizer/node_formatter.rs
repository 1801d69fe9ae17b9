use crate::core::{
    application::{
        normalizer::units::{NOT_AVAILABLE, format_byte_pair, format_fraction, format_uptime},
        response::node_response::{NodeDetail, NodeSummary},
    },
    domain::{
        model::{
            node_list_item::NodeListItem,
            node_status::{NodeStatus, UsageInfo},
        },
        value_object::NodeName,
    },
};

const UNKNOWN: &str = "unknown";

pub fn format_node(item: &NodeListItem) -> NodeSummary {
    NodeSummary {
        node: item.node.clone(),
        status: item.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        uptime: item
            .uptime
            .map(format_uptime)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        cpu: format_fraction(item.cpu),
        memory: match item.maxmem {
            Some(total) => format_byte_pair(item.mem.unwrap_or(0), total),
            None => NOT_AVAILABLE.to_string(),
        },
    }
}

/// Formats `/nodes/{node}/status`; `requested` fills in the name when the
/// upstream does not echo it.
pub fn format_node_detail(requested: &NodeName, status: &NodeStatus) -> NodeDetail {
    let kernel_release = status
        .kversion
        .clone()
        .or_else(|| status.kernel.clone())
        .or_else(|| {
            status
                .current_kernel
                .as_ref()
                .and_then(|k| k.release.clone())
        })
        .unwrap_or_else(|| UNKNOWN.to_string());

    NodeDetail {
        node: status
            .nodename
            .clone()
            .unwrap_or_else(|| requested.as_str().to_string()),
        status: status.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        uptime: status
            .uptime
            .map(format_uptime)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        cpu: format_fraction(status.cpu),
        cpus: status.cpuinfo.as_ref().and_then(|c| c.cpus).unwrap_or(0),
        memory: format_usage(status.memory.as_ref()),
        swap: format_usage(status.swap.as_ref()),
        disk: format_usage(status.rootfs.as_ref()),
        load: status.loadavg.unwrap_or([0.0; 3]),
        kernel_release,
        pve_version: status.pveversion.clone(),
    }
}

fn format_usage(usage: Option<&UsageInfo>) -> String {
    let (used, total) = usage
        .map(|u| (u.used.unwrap_or(0), u.total.unwrap_or(0)))
        .unwrap_or((0, 0));
    format_byte_pair(used, total)
}
