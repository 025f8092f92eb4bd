//! Ranking configuration for the route planner.

/// Configuration parameters for route ranking.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Number of alternatives returned when the request doesn't say.
    pub default_k: usize,

    /// Paths enumerated per requested alternative.
    /// Extra candidates leave room for the budget filter.
    pub candidate_factor: usize,

    /// Divisor bringing costs into the same magnitude as hours.
    /// Used both in edge traversal weights and in the cost sub-score.
    pub cost_scale: f64,

    /// Reliability lost per hub visited.
    pub reliability_decay: f64,

    /// Lowest reliability a route can have.
    pub reliability_floor: f64,
}

impl RankConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_k: usize,
        candidate_factor: usize,
        cost_scale: f64,
        reliability_decay: f64,
        reliability_floor: f64,
    ) -> Self {
        Self {
            default_k,
            candidate_factor,
            cost_scale,
            reliability_decay,
            reliability_floor,
        }
    }

    /// Returns the number of paths to enumerate for `k` alternatives.
    pub fn candidate_limit(&self, k: usize) -> usize {
        k.saturating_mul(self.candidate_factor)
    }

    /// Returns the reliability of a route visiting `node_count` hubs.
    pub fn reliability(&self, node_count: usize) -> f64 {
        (1.0 - self.reliability_decay * node_count as f64).max(self.reliability_floor)
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            default_k: 3,
            candidate_factor: 2,
            cost_scale: 1000.0,
            reliability_decay: 0.02,
            reliability_floor: 0.5,
        }
    }
}
