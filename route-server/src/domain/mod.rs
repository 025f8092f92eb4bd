//! Domain types for the route planner.
//!
//! This module contains the core domain model types that represent
//! validated network and routing data. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod cargo;
mod error;
mod mode;
mod node;
mod preference;
mod route;

pub use cargo::CargoClass;
pub use error::DomainError;
pub use mode::{InvalidTransportMode, TransportMode};
pub use node::{Coordinates, InvalidNodeId, Node, NodeId};
pub use preference::{
    InvalidPreference, Preference, RouteConstraints, ScoreWeights, TraversalWeights,
};
pub use route::{Route, RouteCandidate, Segment};
