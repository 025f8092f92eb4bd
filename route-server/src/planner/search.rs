//! Route search: enumerate, filter, score and rank alternatives.
//!
//! Paths are enumerated with a preference-weighted edge cost, turned into
//! routes, filtered against the request's constraints, then scored with a
//! separate set of preference weights and truncated to the requested count.

use tracing::{debug, trace};

use crate::domain::{
    DomainError, InvalidPreference, NodeId, Preference, Route, RouteCandidate, RouteConstraints,
    Segment,
};
use crate::network::{Edge, Network, NodeIndex};

use super::config::RankConfig;
use super::paths::{ShortestSimplePaths, WeightedPath};
use super::rank::{rank_candidates, score};

/// Error from route ranking.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RankError {
    /// Origin or destination isn't in the network
    #[error("node not found: {0}")]
    UnknownNode(NodeId),

    /// Preference isn't one of the presets
    #[error(transparent)]
    InvalidPreference(#[from] InvalidPreference),

    /// Request is well-typed but can't be answered
    #[error("invalid rank request: {0}")]
    InvalidRequest(String),

    /// An enumerated path didn't form a valid route
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] DomainError),
}

/// Request for ranked route alternatives.
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub origin: NodeId,
    pub destination: NodeId,
    pub preference: Preference,
    pub constraints: RouteConstraints,

    /// Number of alternatives wanted; `None` uses the configured default.
    pub k: Option<usize>,
}

impl RankRequest {
    /// Create a request with no constraints and the default count.
    pub fn new(origin: NodeId, destination: NodeId, preference: Preference) -> Self {
        Self {
            origin,
            destination,
            preference,
            constraints: RouteConstraints::default(),
            k: None,
        }
    }

    pub fn with_constraints(mut self, constraints: RouteConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Resolve both endpoints in `network`.
    pub fn validate(&self, network: &Network) -> Result<(NodeIndex, NodeIndex), RankError> {
        let origin = network
            .node_index(&self.origin)
            .ok_or_else(|| RankError::UnknownNode(self.origin.clone()))?;
        let destination = network
            .node_index(&self.destination)
            .ok_or_else(|| RankError::UnknownNode(self.destination.clone()))?;

        if origin == destination {
            return Err(RankError::InvalidRequest(
                "origin and destination are the same".to_string(),
            ));
        }

        Ok((origin, destination))
    }
}

/// Route ranker.
pub struct Ranker<'a> {
    config: &'a RankConfig,
}

impl<'a> Ranker<'a> {
    /// Create a new ranker.
    pub fn new(config: &'a RankConfig) -> Self {
        Self { config }
    }

    /// Rank route alternatives between the request's endpoints.
    ///
    /// Returns at most `k` candidates, best first. An empty result means no
    /// route exists or none satisfies the constraints.
    pub fn rank(
        &self,
        network: &Network,
        request: &RankRequest,
    ) -> Result<Vec<RouteCandidate>, RankError> {
        let (origin, destination) = request.validate(network)?;
        let k = request.k.unwrap_or(self.config.default_k);
        if k == 0 {
            return Ok(Vec::new());
        }

        let traversal = request.preference.traversal_weights();
        let cost_scale = self.config.cost_scale;
        let edge_weight =
            |edge: &Edge| traversal.duration * edge.duration_h + traversal.cost * (edge.cost / cost_scale);

        let paths: Vec<WeightedPath> =
            ShortestSimplePaths::new(network, origin, destination, edge_weight)
                .take(self.config.candidate_limit(k))
                .collect();
        let enumerated = paths.len();

        let score_weights = request.preference.score_weights();
        let mut candidates = Vec::with_capacity(paths.len());

        for path in &paths {
            let route = materialize(network, path)?;

            let total_cost = route.total_cost();
            if !request.constraints.within_budget(total_cost) {
                trace!(total_cost, "Dropping candidate over budget");
                continue;
            }
            if !request.constraints.allow_multimodal && route.is_multimodal() {
                trace!("Dropping multimodal candidate");
                continue;
            }

            let reliability_score = self.config.reliability(route.node_count());
            let score = score(
                route.total_duration_hours(),
                total_cost,
                reliability_score,
                score_weights,
                cost_scale,
            );

            candidates.push(RouteCandidate {
                route,
                reliability_score,
                score,
            });
        }

        let mut ranked = rank_candidates(candidates);
        ranked.truncate(k);

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            preference = %request.preference,
            enumerated,
            returned = ranked.len(),
            "Ranked routes"
        );

        Ok(ranked)
    }
}

/// Rank route alternatives with the given configuration.
pub fn rank(
    network: &Network,
    request: &RankRequest,
    config: &RankConfig,
) -> Result<Vec<RouteCandidate>, RankError> {
    Ranker::new(config).rank(network, request)
}

/// Turn an enumerated path into a route, one segment per hop.
fn materialize(network: &Network, path: &WeightedPath) -> Result<Route, DomainError> {
    let segments = path
        .edges
        .iter()
        .zip(path.nodes.windows(2))
        .map(|(&edge_idx, hop)| {
            let edge = network.edge(edge_idx);
            Segment {
                mode: edge.mode,
                from: network.node(hop[0]).id.clone(),
                to: network.node(hop[1]).id.clone(),
                distance_km: edge.distance_km,
                duration_hours: edge.duration_h,
                cost: edge.cost,
            }
        })
        .collect();

    Route::new(segments)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
