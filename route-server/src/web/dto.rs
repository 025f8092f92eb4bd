//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::{DEFAULT_WINDOW_MINUTES, Order};
use crate::domain::{
    CargoClass, InvalidPreference, NodeId, Preference, RouteCandidate, RouteConstraints, Segment,
    TransportMode,
};
use crate::network::ClosureSet;

/// The goods to be moved.
#[derive(Debug, Clone, Deserialize)]
pub struct Shipment {
    pub origin_id: NodeId,
    pub destination_id: NodeId,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub cargo_class: CargoClass,

    /// Latest acceptable delivery (ISO-8601); informational
    #[serde(default)]
    pub required_delivery: Option<String>,
}

/// What the shipper wants optimized.
#[derive(Debug, Clone, Deserialize)]
pub struct Preferences {
    /// One of "cost", "time", "balanced"; balanced when absent
    #[serde(default)]
    pub optimize_for: Option<String>,

    #[serde(default)]
    pub max_budget: Option<f64>,

    #[serde(default = "default_true")]
    pub allow_multimodal: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            optimize_for: None,
            max_budget: None,
            allow_multimodal: true,
        }
    }
}

impl Preferences {
    /// Parse into a preference and constraints.
    pub fn resolve(&self) -> Result<(Preference, RouteConstraints), InvalidPreference> {
        let preference = match &self.optimize_for {
            Some(s) => s.parse()?,
            None => Preference::default(),
        };
        let constraints = RouteConstraints {
            max_budget: self.max_budget,
            allow_multimodal: self.allow_multimodal,
        };
        Ok((preference, constraints))
    }
}

/// Request to rank routes for a shipment.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub shipment: Shipment,

    #[serde(default)]
    pub preferences: Preferences,

    /// Number of alternatives wanted
    #[serde(default)]
    pub k_alternatives: Option<usize>,
}

/// Request to rank routes again after closures.
#[derive(Debug, Clone, Deserialize)]
pub struct RecalculateRequest {
    /// Route being replaced, if the caller has one
    #[serde(default)]
    pub route_id: Option<String>,

    pub shipment: Shipment,

    #[serde(default)]
    pub preferences: Preferences,

    #[serde(default)]
    pub k_alternatives: Option<usize>,

    #[serde(default)]
    pub closed_nodes: Vec<NodeId>,

    /// Closed links as `[from, to]` pairs; direction is ignored
    #[serde(default)]
    pub closed_edges: Vec<[NodeId; 2]>,
}

impl RecalculateRequest {
    pub fn closures(&self) -> ClosureSet {
        ClosureSet::from_parts(
            self.closed_nodes.iter().cloned(),
            self.closed_edges
                .iter()
                .map(|[from, to]| (from.clone(), to.clone())),
        )
    }
}

/// One hop of a recommended route.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub mode: TransportMode,
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub cost: f64,
}

impl SegmentResult {
    /// Create from a domain Segment.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            mode: segment.mode,
            from: segment.from.to_string(),
            to: segment.to.to_string(),
            distance_km: segment.distance_km,
            duration_hours: segment.duration_hours,
            cost: segment.cost,
        }
    }
}

/// A ranked route alternative.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Fresh per response
    pub route_id: String,
    pub transport_modes: Vec<TransportMode>,
    pub segments: Vec<SegmentResult>,
    pub total_cost: f64,
    pub total_duration_hours: f64,
    pub total_distance_km: f64,
    pub reliability_score: f64,

    /// Unrounded, so ties are visible
    pub score: f64,
}

impl Recommendation {
    /// Create from a ranked candidate.
    pub fn from_candidate(candidate: &RouteCandidate) -> Self {
        let route = &candidate.route;
        Self {
            route_id: Uuid::new_v4().to_string(),
            transport_modes: route.transport_modes(),
            segments: route
                .segments()
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
            total_cost: round2(route.total_cost()),
            total_duration_hours: round2(route.total_duration_hours()),
            total_distance_km: round2(route.total_distance_km()),
            reliability_score: round2(candidate.reliability_score),
            score: candidate.score,
        }
    }
}

/// Summary of a ranking response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analytics {
    /// Cost per mode of the best recommendation
    pub cost_breakdown: BTreeMap<String, f64>,

    pub risk_factors: Vec<String>,

    pub alternative_routes: usize,
}

/// Response with ranked routes.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeResponse {
    pub recommendations: Vec<Recommendation>,
    pub analytics: Analytics,
}

impl OptimizeResponse {
    /// Build the response for ranked candidates.
    ///
    /// `reliability_floor` flags recommendations that are as unreliable as
    /// a route can be.
    pub fn from_candidates(
        candidates: &[RouteCandidate],
        closures: &ClosureSet,
        reliability_floor: f64,
    ) -> Self {
        let recommendations: Vec<Recommendation> = candidates
            .iter()
            .map(Recommendation::from_candidate)
            .collect();

        let cost_breakdown = candidates
            .first()
            .map(|best| {
                best.route
                    .cost_by_mode()
                    .into_iter()
                    .map(|(mode, cost)| (mode.as_str().to_string(), round2(cost)))
                    .collect()
            })
            .unwrap_or_default();

        let mut closed_nodes: Vec<String> = closures
            .closed_nodes()
            .map(|n| format!("node closed: {n}"))
            .collect();
        closed_nodes.sort();
        let mut closed_edges: Vec<String> = closures
            .closed_edges()
            .map(|(x, y)| format!("link closed: {x}-{y}"))
            .collect();
        closed_edges.sort();

        let mut risk_factors = closed_nodes;
        risk_factors.extend(closed_edges);
        risk_factors.extend(
            candidates
                .iter()
                .zip(&recommendations)
                .filter(|(c, _)| c.reliability_score <= reliability_floor)
                .map(|(_, r)| format!("low reliability: route {}", r.route_id)),
        );

        let analytics = Analytics {
            cost_breakdown,
            risk_factors,
            alternative_routes: recommendations.len(),
        };

        Self {
            recommendations,
            analytics,
        }
    }
}

/// Request to group orders.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchOrdersRequest {
    pub orders: Vec<Order>,

    #[serde(default = "default_window")]
    pub window_minutes: u32,
}

fn default_window() -> u32 {
    DEFAULT_WINDOW_MINUTES
}

/// Grouped orders.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOrdersResponse {
    pub num_batches: usize,
    pub batches: Vec<Vec<Order>>,
}

/// Service counters since startup.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    pub status: &'static str,
    pub requests_served: u64,
    pub routes_served: u64,
    pub avg_latency_ms: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Round to two decimal places for display.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
