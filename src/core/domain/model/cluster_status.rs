//! Domain models for the `/cluster/status` endpoint.
//!
//! The response is a heterogeneous list whose `type` field says what each
//! entry describes. Only node, quorum and cluster entries matter for health;
//! anything else, including an entry without a `type`, decodes to
//! [`ClusterStatusEntry::Other`] so one odd entry cannot fail the whole list.

use crate::core::domain::value_object::serde_helpers;
use serde::{Deserialize, de::IgnoredAny};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LenientEntry")]
pub enum ClusterStatusEntry {
    /// A cluster member.
    Node(ClusterNodeEntry),
    /// Corosync vote counts.
    Quorum(QuorumEntry),
    /// The cluster itself.
    Cluster(ClusterEntry),
    Other,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedEntry {
    Node(ClusterNodeEntry),
    Quorum(QuorumEntry),
    Cluster(ClusterEntry),
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientEntry {
    Tagged(TaggedEntry),
    Untyped(IgnoredAny),
}

impl From<LenientEntry> for ClusterStatusEntry {
    fn from(entry: LenientEntry) -> Self {
        match entry {
            LenientEntry::Tagged(TaggedEntry::Node(node)) => ClusterStatusEntry::Node(node),
            LenientEntry::Tagged(TaggedEntry::Quorum(quorum)) => ClusterStatusEntry::Quorum(quorum),
            LenientEntry::Tagged(TaggedEntry::Cluster(cluster)) => {
                ClusterStatusEntry::Cluster(cluster)
            }
            LenientEntry::Tagged(TaggedEntry::Other) | LenientEntry::Untyped(_) => {
                ClusterStatusEntry::Other
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ClusterNodeEntry {
    #[serde(default)]
    pub node: Option<String>,
    /// PVE reports the member name here; `node` is accepted as well.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_flag::deserialize")]
    pub online: Option<bool>,
    #[serde(default)]
    pub ip: Option<String>,
}

impl ClusterNodeEntry {
    pub fn node_name(&self) -> Option<&str> {
        self.node.as_deref().or(self.name.as_deref())
    }

    pub fn is_online(&self) -> bool {
        self.online.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct QuorumEntry {
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub votes: Option<u64>,
    #[serde(default, deserialize_with = "serde_helpers::opt_u64::deserialize")]
    pub quorum_votes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ClusterEntry {
    #[serde(default)]
    pub name: Option<String>,
}
