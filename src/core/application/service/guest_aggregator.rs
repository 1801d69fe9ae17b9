//! Cluster-wide guest listing.
//!
//! The node list is fetched once, then every (node, kind) combination is
//! fetched concurrently. A failing combination contributes no guests and is
//! reported as a [`FetchDiagnostic`]; only a failure to enumerate nodes fails
//! the whole listing. Dropping the returned future cancels every in-flight
//! fetch.

use crate::core::{
    application::{
        normalizer::guest_formatter::format_guest,
        response::guest_response::{FetchDiagnostic, GuestListing, GuestView},
    },
    domain::{
        error::ProxmoxResult,
        model::guest::{GuestKind, GuestKindFilter, GuestRecord},
        value_object::NodeName,
    },
    infrastructure::upstream_api::{UpstreamApi, guests_of_kind},
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// What one (node, kind) fetch produced.
struct ContributorOutcome {
    node: NodeName,
    kind: GuestKind,
    result: ProxmoxResult<Vec<GuestRecord>>,
}

pub struct GuestAggregator {
    api: Arc<dyn UpstreamApi>,
}

impl GuestAggregator {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }

    /// Lists guests across the cluster, or on `node_filter` alone.
    ///
    /// Guests come back sorted by numeric id, then node, then kind.
    ///
    /// # Errors
    /// Fails only when the node enumeration itself fails.
    pub async fn list(
        &self,
        node_filter: Option<&NodeName>,
        kinds: GuestKindFilter,
    ) -> ProxmoxResult<GuestListing> {
        let nodes = match node_filter {
            Some(node) => vec![node.clone()],
            None => self
                .api
                .nodes()
                .await?
                .into_iter()
                .map(|item| NodeName::new_unchecked(item.node))
                .collect(),
        };

        let fetches = nodes.iter().flat_map(move |node| {
            kinds
                .kinds()
                .into_iter()
                .map(move |kind| self.fetch(node, kind))
        });
        let outcomes = join_all(fetches).await;

        let mut listing = GuestListing::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(records) => {
                    debug!(
                        node = %outcome.node,
                        kind = %outcome.kind,
                        count = records.len(),
                        "guests fetched"
                    );
                    listing.guests.extend(records.iter().map(|record| {
                        format_guest(record, outcome.node.as_str(), outcome.kind, None)
                    }));
                }
                Err(error) => {
                    warn!(
                        node = %outcome.node,
                        kind = %outcome.kind,
                        %error,
                        "guest fetch failed, continuing without this node"
                    );
                    listing.diagnostics.push(FetchDiagnostic {
                        node: outcome.node.to_string(),
                        kind: outcome.kind,
                        message: error.to_string(),
                    });
                }
            }
        }

        sort_guests(&mut listing.guests);
        Ok(listing)
    }

    async fn fetch(&self, node: &NodeName, kind: GuestKind) -> ContributorOutcome {
        ContributorOutcome {
            node: node.clone(),
            kind,
            result: guests_of_kind(self.api.as_ref(), node, kind).await,
        }
    }
}

/// Ascending numeric id; node and kind break ties so the order is total.
pub fn sort_guests(guests: &mut [GuestView]) {
    guests.sort_by(|a, b| {
        a.numeric_id()
            .cmp(&b.numeric_id())
            .then_with(|| a.node.cmp(&b.node))
            .then_with(|| a.kind.cmp(&b.kind))
    });
}
