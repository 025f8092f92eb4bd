//! Fluent network construction and the built-in prototype topology.

use tracing::warn;

use super::{EdgeSpec, Network};
use crate::domain::{Node, NodeId, TransportMode};

/// Builder for creating networks from literal data.
///
/// Entries that fail validation (bad ids, unknown endpoints, out-of-range
/// attributes) are skipped with a warning.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Network,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hub with no location or hub type.
    pub fn node(self, id: &str) -> Self {
        match NodeId::parse(id) {
            Ok(id) => self.with_node(Node::new(id)),
            Err(e) => {
                warn!(id, error = %e, "skipping node");
                self
            }
        }
    }

    /// Add a fully described hub.
    pub fn with_node(mut self, node: Node) -> Self {
        if let Err(e) = self.inner.add_node(node) {
            warn!(error = %e, "skipping node");
        }
        self
    }

    /// Add a leg between two previously added hubs.
    pub fn edge(
        mut self,
        from: &str,
        to: &str,
        mode: TransportMode,
        distance_km: f64,
        duration_h: f64,
        cost: f64,
    ) -> Self {
        let (Ok(from), Ok(to)) = (NodeId::parse(from), NodeId::parse(to)) else {
            warn!(from, to, "skipping edge with invalid node id");
            return self;
        };

        let spec = EdgeSpec {
            from,
            to,
            mode,
            distance_km,
            duration_h,
            cost,
        };
        if let Err(e) = self.inner.add_edge(spec) {
            warn!(error = %e, "skipping edge");
        }
        self
    }

    /// Build the network.
    pub fn build(self) -> Network {
        self.inner
    }
}

/// Number of hubs in the prototype network.
pub const PROTOTYPE_NODE_COUNT: usize = 30;

/// Id of the `i`-th prototype hub, e.g. `NODE_007`.
pub fn prototype_node_name(i: usize) -> String {
    format!("NODE_{i:03}")
}

/// The fixed prototype topology.
///
/// A road chain `NODE_000 – NODE_001 – … – NODE_029` whose legs get slightly
/// longer, slower and dearer along the chain, plus two air shortcuts:
/// `NODE_000 – NODE_010` and `NODE_015 – NODE_029`.
pub fn prototype_network() -> Network {
    let mut builder = NetworkBuilder::new();

    for i in 0..PROTOTYPE_NODE_COUNT {
        builder = builder.node(&prototype_node_name(i));
    }

    for i in 0..PROTOTYPE_NODE_COUNT - 1 {
        let step = i as f64;
        builder = builder.edge(
            &prototype_node_name(i),
            &prototype_node_name(i + 1),
            TransportMode::Road,
            50.0 + 2.0 * step,
            1.0 + step * 0.05,
            200.0 + 5.0 * step,
        );
    }

    builder
        .edge("NODE_000", "NODE_010", TransportMode::Air, 800.0, 1.3, 4000.0)
        .edge("NODE_015", "NODE_029", TransportMode::Air, 700.0, 1.2, 3800.0)
        .build()
}
