//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for ranking routes, recalculating around
//! closures, and batching orders.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, MAX_ALTERNATIVES, create_router};
pub use state::{AppState, ServiceStats, StatsSnapshot};
