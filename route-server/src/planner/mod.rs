//! Route planner using k-shortest simple paths.
//!
//! This module answers: "what are the best few ways to move this shipment
//! from one hub to another, given what the shipper cares about?"
//!
//! Paths are enumerated in order of a preference-weighted traversal cost,
//! then each is scored on time, cost and reliability and the best are kept.

mod config;
mod paths;
mod rank;
mod search;

pub use config::RankConfig;
pub use paths::{ShortestSimplePaths, WeightedPath};
pub use rank::{rank_candidates, score};
pub use search::{RankError, RankRequest, Ranker, rank};
