//! Optimization preferences and route constraints.
//!
//! A preference drives two independent weightings: one applied per edge
//! while enumerating paths, and one applied to completed candidates when
//! scoring them. The two sets of constants are deliberately kept apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a preference is not one of the recognised presets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid preference {0:?}: expected one of cost, time, balanced")]
pub struct InvalidPreference(pub String);

/// What the caller wants the ranking to favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Cost,
    Time,
    #[default]
    Balanced,
}

/// Per-edge weighting used during path enumeration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalWeights {
    /// Multiplier for `duration_h`.
    pub duration: f64,
    /// Multiplier for the scaled cost.
    pub cost: f64,
}

/// Weighting of the sub-scores of a completed candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub time: f64,
    pub cost: f64,
    pub reliability: f64,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Cost => "cost",
            Preference::Time => "time",
            Preference::Balanced => "balanced",
        }
    }

    /// Weights for the edge traversal cost `α·duration + β·cost/scale`.
    pub fn traversal_weights(&self) -> TraversalWeights {
        let (duration, cost) = match self {
            Preference::Time => (0.7, 0.3),
            Preference::Cost => (0.2, 0.8),
            Preference::Balanced => (0.5, 0.5),
        };
        TraversalWeights { duration, cost }
    }

    /// Weights for the final candidate score.
    pub fn score_weights(&self) -> ScoreWeights {
        let (time, cost, reliability) = match self {
            Preference::Time => (0.6, 0.3, 0.1),
            Preference::Cost => (0.3, 0.6, 0.1),
            Preference::Balanced => (0.4, 0.4, 0.2),
        };
        ScoreWeights {
            time,
            cost,
            reliability,
        }
    }
}

impl FromStr for Preference {
    type Err = InvalidPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost" => Ok(Preference::Cost),
            "time" => Ok(Preference::Time),
            "balanced" => Ok(Preference::Balanced),
            other => Err(InvalidPreference(other.to_string())),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hard limits a candidate must satisfy to be returned.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConstraints {
    /// Maximum total cost. `None` means unlimited.
    pub max_budget: Option<f64>,

    /// When false, routes mixing several transport modes are discarded.
    pub allow_multimodal: bool,
}

impl RouteConstraints {
    /// No budget, multimodal routes allowed.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_budget(max_budget: f64) -> Self {
        Self {
            max_budget: Some(max_budget),
            ..Self::default()
        }
    }

    /// Whether a route with the given total cost fits the budget.
    pub fn within_budget(&self, total_cost: f64) -> bool {
        self.max_budget.is_none_or(|budget| total_cost <= budget)
    }
}

impl Default for RouteConstraints {
    fn default() -> Self {
        Self {
            max_budget: None,
            allow_multimodal: true,
        }
    }
}
