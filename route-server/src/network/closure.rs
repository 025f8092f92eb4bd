//! Closed hubs and links.
//!
//! A closure set models outages: hubs that can't be used at all, and hub
//! pairs whose direct links are unavailable in every mode.

use std::collections::HashSet;

use crate::domain::NodeId;

/// Nodes and undirected node pairs to exclude from a network view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureSet {
    nodes: HashSet<NodeId>,
    /// Pairs stored with the smaller id first.
    edges: HashSet<(NodeId, NodeId)>,
}

fn unordered(x: NodeId, y: NodeId) -> (NodeId, NodeId) {
    if x <= y { (x, y) } else { (y, x) }
}

impl ClosureSet {
    /// Create an empty closure set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a closure set from closed nodes and closed pairs.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Self {
        let mut closures = Self::new();
        for node in nodes {
            closures.close_node(node);
        }
        for (x, y) in edges {
            closures.close_edge(x, y);
        }
        closures
    }

    pub fn close_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Close the link between two hubs, in both directions.
    pub fn close_edge(&mut self, x: NodeId, y: NodeId) {
        self.edges.insert(unordered(x, y));
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.close_node(node);
        self
    }

    pub fn with_edge(mut self, x: NodeId, y: NodeId) -> Self {
        self.close_edge(x, y);
        self
    }

    pub fn is_node_closed(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    pub fn is_edge_closed(&self, x: &NodeId, y: &NodeId) -> bool {
        self.edges.contains(&unordered(x.clone(), y.clone()))
    }

    pub fn closed_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn closed_edges(&self) -> impl Iterator<Item = &(NodeId, NodeId)> {
        self.edges.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
