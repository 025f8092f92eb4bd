//! The transportation multigraph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ClosureSet, NetworkError};
use crate::domain::{DomainError, Node, NodeId, TransportMode};

/// Position of a node in a `Network`.
///
/// Only meaningful for the network that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// Position of an edge in a `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub usize);

/// Description of an edge by node ids, as found in network documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: NodeId,
    pub to: NodeId,
    pub mode: TransportMode,
    pub distance_km: f64,
    pub duration_h: f64,
    pub cost: f64,
}

impl EdgeSpec {
    /// Check attribute ranges: distance and cost non-negative, duration positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(DomainError::InvalidQuantity {
                field: "distance_km",
                value: self.distance_km,
            });
        }
        if !self.duration_h.is_finite() || self.duration_h <= 0.0 {
            return Err(DomainError::InvalidQuantity {
                field: "duration_h",
                value: self.duration_h,
            });
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(DomainError::InvalidQuantity {
                field: "cost",
                value: self.cost,
            });
        }
        Ok(())
    }
}

/// An undirected transport leg between two hubs.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub a: NodeIndex,
    pub b: NodeIndex,
    pub mode: TransportMode,
    pub distance_km: f64,
    pub duration_h: f64,
    pub cost: f64,
}

impl Edge {
    /// The endpoint that isn't `node`.
    pub fn opposite(&self, node: NodeIndex) -> NodeIndex {
        if self.a == node { self.b } else { self.a }
    }

    /// Whether this edge joins `x` and `y`, in either direction.
    pub fn connects(&self, x: NodeIndex, y: NodeIndex) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Serialized form of a network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeSpec>,
}

/// An undirected multigraph of hubs and transport legs.
///
/// Several edges may join the same pair of hubs, typically one per mode.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<NodeId, NodeIndex>,
    edges: Vec<Edge>,
    /// Incident edges per node, in insertion order.
    adjacency: Vec<Vec<EdgeIndex>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hub.
    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex, NetworkError> {
        if self.index.contains_key(&node.id) {
            return Err(NetworkError::DuplicateNode(node.id));
        }
        Ok(self.push_node(node))
    }

    /// Add a leg between two existing hubs.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> Result<EdgeIndex, NetworkError> {
        spec.validate()?;

        let a = self
            .node_index(&spec.from)
            .ok_or_else(|| NetworkError::UnknownNode(spec.from.clone()))?;
        let b = self
            .node_index(&spec.to)
            .ok_or_else(|| NetworkError::UnknownNode(spec.to.clone()))?;
        if a == b {
            return Err(NetworkError::SelfLoop(spec.from));
        }

        Ok(self.push_edge(Edge {
            a,
            b,
            mode: spec.mode,
            distance_km: spec.distance_km,
            duration_h: spec.duration_h,
            cost: spec.cost,
        }))
    }

    fn push_node(&mut self, node: Node) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        idx
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeIndex {
        let idx = EdgeIndex(self.edges.len());
        self.adjacency[edge.a.0].push(idx);
        self.adjacency[edge.b.0].push(idx);
        self.edges.push(edge);
        idx
    }

    /// Build a network from its serialized form.
    pub fn from_document(document: NetworkDocument) -> Result<Self, NetworkError> {
        let mut network = Network::new();
        for node in document.nodes {
            network.add_node(node)?;
        }
        for edge in document.edges {
            network.add_edge(edge)?;
        }
        Ok(network)
    }

    /// Serialize the network.
    pub fn to_document(&self) -> NetworkDocument {
        NetworkDocument {
            nodes: self.nodes.clone(),
            edges: self.edges.iter().map(|e| self.edge_spec(e)).collect(),
        }
    }

    fn edge_spec(&self, edge: &Edge) -> EdgeSpec {
        EdgeSpec {
            from: self.node(edge.a).id.clone(),
            to: self.node(edge.b).id.clone(),
            mode: edge.mode,
            distance_km: edge.distance_km,
            duration_h: edge.duration_h,
            cost: edge.cost,
        }
    }

    /// Derive a view with the given closures applied.
    ///
    /// Closed nodes disappear together with every edge touching them; closed
    /// pairs lose all their parallel edges. Unknown ids are ignored. `self`
    /// is left untouched.
    pub fn without(&self, closures: &ClosureSet) -> Network {
        let mut derived = Network::new();

        for node in &self.nodes {
            if !closures.is_node_closed(&node.id) {
                derived.push_node(node.clone());
            }
        }

        for edge in &self.edges {
            let from = &self.node(edge.a).id;
            let to = &self.node(edge.b).id;
            if closures.is_edge_closed(from, to) {
                continue;
            }
            let (Some(a), Some(b)) = (derived.node_index(from), derived.node_index(to)) else {
                continue;
            };
            derived.push_edge(Edge { a, b, ..edge.clone() });
        }

        derived
    }

    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Panics if `idx` did not come from this network.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Panics if `idx` did not come from this network.
    pub fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.edges[idx.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges incident to `node`.
    pub fn incident_edges(&self, node: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.adjacency[node.0]
            .iter()
            .map(move |&idx| (idx, &self.edges[idx.0]))
    }

    /// All parallel edges between two hubs, by id.
    pub fn edges_between(&self, x: &NodeId, y: &NodeId) -> Vec<&Edge> {
        let (Some(xi), Some(yi)) = (self.node_index(x), self.node_index(y)) else {
            return Vec::new();
        };
        self.incident_edges(xi)
            .filter(|(_, e)| e.connects(xi, yi))
            .map(|(_, e)| e)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    fn spec(from: &str, to: &str, mode: TransportMode, duration_h: f64, cost: f64) -> EdgeSpec {
        EdgeSpec {
            from: id(from),
            to: id(to),
            mode,
            distance_km: 100.0,
            duration_h,
            cost,
        }
    }

    fn triangle() -> Network {
        let mut net = Network::new();
        for n in ["A", "B", "C"] {
            net.add_node(Node::new(id(n))).unwrap();
        }
        net.add_edge(spec("A", "B", TransportMode::Road, 2.0, 100.0))
            .unwrap();
        net.add_edge(spec("A", "B", TransportMode::Air, 0.5, 900.0))
            .unwrap();
        net.add_edge(spec("B", "C", TransportMode::Road, 1.0, 50.0))
            .unwrap();
        net.add_edge(spec("A", "C", TransportMode::Rail, 2.5, 120.0))
            .unwrap();
        net
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut net = Network::new();
        net.add_node(Node::new(id("A"))).unwrap();
        assert!(matches!(
            net.add_node(Node::new(id("A"))),
            Err(NetworkError::DuplicateNode(_))
        ));
    }

    #[test]
    fn edge_to_unknown_node_rejected() {
        let mut net = Network::new();
        net.add_node(Node::new(id("A"))).unwrap();
        let err = net
            .add_edge(spec("A", "Z", TransportMode::Road, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(n) if n == id("Z")));
    }

    #[test]
    fn self_loop_rejected() {
        let mut net = Network::new();
        net.add_node(Node::new(id("A"))).unwrap();
        assert!(matches!(
            net.add_edge(spec("A", "A", TransportMode::Road, 1.0, 1.0)),
            Err(NetworkError::SelfLoop(_))
        ));
    }

    #[test]
    fn invalid_attributes_rejected() {
        let mut net = Network::new();
        net.add_node(Node::new(id("A"))).unwrap();
        net.add_node(Node::new(id("B"))).unwrap();

        for bad in [
            spec("A", "B", TransportMode::Road, 0.0, 1.0),
            spec("A", "B", TransportMode::Road, -1.0, 1.0),
            spec("A", "B", TransportMode::Road, f64::NAN, 1.0),
            spec("A", "B", TransportMode::Road, 1.0, -0.5),
            EdgeSpec {
                distance_km: -3.0,
                ..spec("A", "B", TransportMode::Road, 1.0, 1.0)
            },
        ] {
            assert!(matches!(
                net.add_edge(bad),
                Err(NetworkError::InvalidEdge(_))
            ));
        }
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn parallel_edges_kept() {
        let net = triangle();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 4);

        let ab = net.edges_between(&id("A"), &id("B"));
        assert_eq!(ab.len(), 2);
        assert_eq!(ab[0].mode, TransportMode::Road);
        assert_eq!(ab[1].mode, TransportMode::Air);

        // Undirected
        assert_eq!(net.edges_between(&id("B"), &id("A")).len(), 2);
        assert!(net.edges_between(&id("A"), &id("Z")).is_empty());
    }

    #[test]
    fn opposite_endpoint() {
        let net = triangle();
        let a = net.node_index(&id("A")).unwrap();
        let b = net.node_index(&id("B")).unwrap();
        let edge = net.edge(EdgeIndex(0));
        assert_eq!(edge.opposite(a), b);
        assert_eq!(edge.opposite(b), a);
        assert!(edge.connects(b, a));
    }

    #[test]
    fn without_removes_closed_node_and_its_edges() {
        let net = triangle();
        let closures = ClosureSet::new().with_node(id("B"));
        let view = net.without(&closures);

        assert_eq!(view.node_count(), 2);
        assert!(!view.contains_node(&id("B")));
        assert_eq!(view.edge_count(), 1);
        assert_eq!(view.edges_between(&id("A"), &id("C")).len(), 1);

        // Canonical network untouched
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 4);
    }

    #[test]
    fn without_removes_every_mode_on_closed_pair() {
        let net = triangle();
        let closures = ClosureSet::new().with_edge(id("B"), id("A"));
        let view = net.without(&closures);

        assert_eq!(view.node_count(), 3);
        assert!(view.edges_between(&id("A"), &id("B")).is_empty());
        assert_eq!(view.edge_count(), 2);
    }

    #[test]
    fn without_ignores_unknown_ids() {
        let net = triangle();
        let closures = ClosureSet::new()
            .with_node(id("NOPE"))
            .with_edge(id("A"), id("NOPE"))
            .with_edge(id("B"), id("NOWHERE"));
        let view = net.without(&closures);

        assert_eq!(view.node_count(), 3);
        assert_eq!(view.edge_count(), 4);
    }

    #[test]
    fn document_roundtrip_preserves_structure() {
        let net = triangle();
        let doc = net.to_document();
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.edges.len(), 4);

        let rebuilt = Network::from_document(doc.clone()).unwrap();
        assert_eq!(rebuilt.to_document(), doc);
    }
}
