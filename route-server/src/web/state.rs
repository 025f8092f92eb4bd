//! Application state for the web layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::network::NetworkProvider;
use crate::planner::RankConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Source of the canonical network
    pub network: Arc<dyn NetworkProvider>,

    /// Route ranking configuration
    pub config: Arc<RankConfig>,

    /// Counters reported by `/analytics`
    pub stats: Arc<ServiceStats>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: impl NetworkProvider + 'static, config: RankConfig) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            stats: Arc::new(ServiceStats::default()),
        }
    }
}

/// Ranking counters since startup.
#[derive(Debug, Default)]
pub struct ServiceStats {
    requests: AtomicU64,
    routes: AtomicU64,
    latency_micros: AtomicU64,
}

/// Point-in-time copy of [`ServiceStats`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub requests_served: u64,
    pub routes_served: u64,
    pub avg_latency_ms: f64,
}

impl ServiceStats {
    /// Record one ranking request that returned `routes` alternatives.
    pub fn record(&self, routes: usize, latency: Duration) {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.routes.fetch_add(routes as u64, Ordering::Relaxed);
        self.latency_micros.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let requests_served = self.requests.load(Ordering::Relaxed);
        let routes_served = self.routes.load(Ordering::Relaxed);
        let latency_micros = self.latency_micros.load(Ordering::Relaxed);

        let avg_latency_ms = if requests_served == 0 {
            0.0
        } else {
            latency_micros as f64 / requests_served as f64 / 1000.0
        };

        StatsSnapshot {
            requests_served,
            routes_served,
            avg_latency_ms,
        }
    }
}
