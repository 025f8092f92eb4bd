//! Route types.
//!
//! A `Route` is a contiguous sequence of network legs from an origin hub
//! to a destination hub. A `RouteCandidate` is a route together with the
//! reliability and score computed for it by the ranker.

use super::{DomainError, NodeId, TransportMode};

/// One leg of a route, travelled in a single mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub mode: TransportMode,
    pub from: NodeId,
    pub to: NodeId,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub cost: f64,
}

/// A complete route from origin to destination.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (`to` of one = `from` of the next)
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    segments: Vec<Segment>,
}

impl Route {
    /// Constructs a route from its segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty or the segments don't connect.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::domain::{NodeId, Route, Segment, TransportMode};
    ///
    /// let a = NodeId::parse("A").unwrap();
    /// let b = NodeId::parse("B").unwrap();
    /// let route = Route::new(vec![Segment {
    ///     mode: TransportMode::Road,
    ///     from: a.clone(),
    ///     to: b.clone(),
    ///     distance_km: 50.0,
    ///     duration_hours: 1.0,
    ///     cost: 200.0,
    /// }])
    /// .unwrap();
    ///
    /// assert_eq!(route.origin(), &a);
    /// assert_eq!(route.destination(), &b);
    /// assert_eq!(route.node_count(), 2);
    /// ```
    pub fn new(segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for window in segments.windows(2) {
            if window[0].to != window[1].from {
                return Err(DomainError::Discontiguous(
                    window[1].from.clone(),
                    window[0].to.clone(),
                ));
            }
        }

        Ok(Route { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn origin(&self) -> &NodeId {
        &self.segments[0].from
    }

    pub fn destination(&self) -> &NodeId {
        &self.segments[self.segments.len() - 1].to
    }

    /// Hubs visited, origin first.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        std::iter::once(self.origin()).chain(self.segments.iter().map(|s| &s.to))
    }

    /// Number of hubs visited, including both endpoints.
    pub fn node_count(&self) -> usize {
        self.segments.len() + 1
    }

    pub fn passes_through(&self, node: &NodeId) -> bool {
        self.nodes().any(|n| n == node)
    }

    pub fn total_cost(&self) -> f64 {
        self.segments.iter().map(|s| s.cost).sum()
    }

    pub fn total_duration_hours(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_hours).sum()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_km).sum()
    }

    /// Modes in the order they are first used.
    pub fn transport_modes(&self) -> Vec<TransportMode> {
        let mut modes: Vec<TransportMode> = Vec::new();
        for segment in &self.segments {
            if !modes.contains(&segment.mode) {
                modes.push(segment.mode);
            }
        }
        modes
    }

    pub fn is_multimodal(&self) -> bool {
        self.transport_modes().len() > 1
    }

    /// Cost summed per mode, in first-use order.
    pub fn cost_by_mode(&self) -> Vec<(TransportMode, f64)> {
        let mut totals: Vec<(TransportMode, f64)> = Vec::new();
        for segment in &self.segments {
            match totals.iter_mut().find(|(mode, _)| *mode == segment.mode) {
                Some((_, total)) => *total += segment.cost,
                None => totals.push((segment.mode, segment.cost)),
            }
        }
        totals
    }
}

/// A ranked route alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub route: Route,

    /// In `[0.5, 1.0]`, lower for longer routes.
    pub reliability_score: f64,

    /// Preference-weighted score; higher is better.
    pub score: f64,
}

impl RouteCandidate {
    pub fn segments(&self) -> &[Segment] {
        self.route.segments()
    }

    pub fn total_cost(&self) -> f64 {
        self.route.total_cost()
    }

    pub fn total_duration_hours(&self) -> f64 {
        self.route.total_duration_hours()
    }

    pub fn transport_modes(&self) -> Vec<TransportMode> {
        self.route.transport_modes()
    }
}
