//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from network-loading and HTTP errors.

use super::NodeId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Route has no segments
    #[error("route must have at least one segment")]
    EmptyRoute,

    /// Consecutive segments don't share a hub
    #[error("segments are not contiguous: {0} does not continue from {1}")]
    Discontiguous(NodeId, NodeId),

    /// A numeric attribute is out of its allowed range
    #[error("invalid {field}: {value}")]
    InvalidQuantity { field: &'static str, value: f64 },
}
