use crate::core::{
    application::response::cluster_health_response::{ClusterHealth, NodeHealth, QuorumView},
    domain::model::cluster_status::ClusterStatusEntry,
};

/// Derives cluster health from `/cluster/status` entries.
///
/// Node entries drive the counts; the cluster is healthy only when every
/// node is online. The first quorum entry, if any, supplies vote counts.
pub fn format_cluster_health(entries: &[ClusterStatusEntry]) -> ClusterHealth {
    let mut node_details = Vec::new();
    let mut nodes_online = 0;
    let mut quorum = None;
    let mut cluster_name = None;

    for entry in entries {
        match entry {
            ClusterStatusEntry::Node(node) => {
                let online = node.is_online();
                if online {
                    nodes_online += 1;
                }
                node_details.push(NodeHealth {
                    node: node.node_name().unwrap_or_default().to_string(),
                    status: if online { "online" } else { "offline" }.to_string(),
                    id: node.id.clone(),
                });
            }
            ClusterStatusEntry::Quorum(q) if quorum.is_none() => {
                quorum = Some(QuorumView {
                    votes: q.votes.unwrap_or(0),
                    quorum_votes: q.quorum_votes.unwrap_or(0),
                });
            }
            ClusterStatusEntry::Cluster(cluster) if cluster_name.is_none() => {
                cluster_name = cluster.name.clone();
            }
            _ => {}
        }
    }

    let nodes_total = node_details.len();
    let status = if nodes_online == nodes_total {
        "healthy"
    } else {
        "degraded"
    };

    ClusterHealth {
        status: status.to_string(),
        nodes_online,
        nodes_total,
        node_details,
        quorum,
        cluster_name,
    }
}
