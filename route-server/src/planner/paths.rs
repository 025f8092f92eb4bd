//! Loopless k-shortest path enumeration (Yen's algorithm).
//!
//! Paths are produced lazily in non-decreasing order of total weight, so
//! callers take as many as they need. Between two hubs joined by several
//! parallel legs, each hop uses the lightest one; two paths are distinct
//! when their hub sequences differ.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use ordered_float::OrderedFloat;

use crate::network::{Edge, EdgeIndex, Network, NodeIndex};

/// A path through the network with its total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPath {
    /// Hubs visited, source first.
    pub nodes: Vec<NodeIndex>,
    /// Edge used for each hop; one shorter than `nodes`.
    pub edges: Vec<EdgeIndex>,
    pub weight: f64,
}

/// Candidate waiting in the heap. Ties on weight go to the earliest found.
#[derive(Debug)]
struct Candidate {
    weight: OrderedFloat<f64>,
    seq: u64,
    path: WeightedPath,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// Hubs and links excluded from a spur search.
#[derive(Default)]
struct Blocked {
    nodes: HashSet<NodeIndex>,
    /// Stored with the smaller index first.
    links: HashSet<(NodeIndex, NodeIndex)>,
}

impl Blocked {
    fn block_link(&mut self, x: NodeIndex, y: NodeIndex) {
        self.links.insert((x.min(y), x.max(y)));
    }

    fn allows(&self, from: NodeIndex, to: NodeIndex) -> bool {
        !self.nodes.contains(&to) && !self.links.contains(&(from.min(to), from.max(to)))
    }
}

/// Iterator over simple paths from `source` to `target`, lightest first.
///
/// `weight` must return a non-negative, finite value for every edge.
pub struct ShortestSimplePaths<'a, W> {
    network: &'a Network,
    source: NodeIndex,
    target: NodeIndex,
    weight: W,
    accepted: Vec<WeightedPath>,
    candidates: BinaryHeap<Reverse<Candidate>>,
    seen: HashSet<Vec<NodeIndex>>,
    next_seq: u64,
    started: bool,
}

impl<'a, W> ShortestSimplePaths<'a, W>
where
    W: Fn(&Edge) -> f64,
{
    pub fn new(network: &'a Network, source: NodeIndex, target: NodeIndex, weight: W) -> Self {
        Self {
            network,
            source,
            target,
            weight,
            accepted: Vec::new(),
            candidates: BinaryHeap::new(),
            seen: HashSet::new(),
            next_seq: 0,
            started: false,
        }
    }

    fn path_weight(&self, edges: &[EdgeIndex]) -> f64 {
        edges
            .iter()
            .map(|&e| (self.weight)(self.network.edge(e)))
            .sum()
    }

    /// Dijkstra from `from` to the target, avoiding `blocked`.
    fn shortest_path(&self, from: NodeIndex, blocked: &Blocked) -> Option<WeightedPath> {
        let n = self.network.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<(NodeIndex, EdgeIndex)>> = vec![None; n];

        dist[from.0] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(0.0), from)));

        while let Some(Reverse((OrderedFloat(d), node))) = heap.pop() {
            if node == self.target {
                break;
            }
            if d > dist[node.0] {
                continue;
            }

            for (edge_idx, edge) in self.network.incident_edges(node) {
                let next = edge.opposite(node);
                if !blocked.allows(node, next) {
                    continue;
                }
                let candidate = d + (self.weight)(edge);
                if candidate < dist[next.0] {
                    dist[next.0] = candidate;
                    prev[next.0] = Some((node, edge_idx));
                    heap.push(Reverse((OrderedFloat(candidate), next)));
                }
            }
        }

        if !dist[self.target.0].is_finite() {
            return None;
        }

        let mut nodes = vec![self.target];
        let mut edges = Vec::new();
        let mut cursor = self.target;
        while cursor != from {
            let (parent, edge) = prev[cursor.0]?;
            nodes.push(parent);
            edges.push(edge);
            cursor = parent;
        }
        nodes.reverse();
        edges.reverse();

        Some(WeightedPath {
            weight: dist[self.target.0],
            nodes,
            edges,
        })
    }

    /// Queue every deviation from the most recently accepted path.
    fn queue_spurs(&mut self) {
        let Some(last) = self.accepted.last().cloned() else {
            return;
        };

        for i in 0..last.nodes.len().saturating_sub(1) {
            let spur = last.nodes[i];
            let root_nodes = &last.nodes[..=i];
            let root_edges = &last.edges[..i];

            let mut blocked = Blocked::default();
            for path in &self.accepted {
                if path.nodes.len() > i + 1 && path.nodes[..=i] == *root_nodes {
                    blocked.block_link(path.nodes[i], path.nodes[i + 1]);
                }
            }
            blocked.nodes.extend(root_nodes[..i].iter().copied());

            let Some(spur_path) = self.shortest_path(spur, &blocked) else {
                continue;
            };

            let mut nodes = root_nodes[..i].to_vec();
            nodes.extend(spur_path.nodes);
            let mut edges = root_edges.to_vec();
            edges.extend(spur_path.edges);

            if !self.seen.insert(nodes.clone()) {
                continue;
            }

            let weight = self.path_weight(&edges);
            let seq = self.next_seq;
            self.next_seq += 1;
            self.candidates.push(Reverse(Candidate {
                weight: OrderedFloat(weight),
                seq,
                path: WeightedPath {
                    nodes,
                    edges,
                    weight,
                },
            }));
        }
    }
}

impl<W> Iterator for ShortestSimplePaths<'_, W>
where
    W: Fn(&Edge) -> f64,
{
    type Item = WeightedPath;

    fn next(&mut self) -> Option<WeightedPath> {
        if !self.started {
            self.started = true;
            let first = self.shortest_path(self.source, &Blocked::default())?;
            self.seen.insert(first.nodes.clone());
            self.accepted.push(first.clone());
            return Some(first);
        }

        self.queue_spurs();

        let Reverse(best) = self.candidates.pop()?;
        self.accepted.push(best.path.clone());
        Some(best.path)
    }
}
