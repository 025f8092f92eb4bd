//! Network construction and loading errors.

use std::path::PathBuf;

use crate::domain::{DomainError, NodeId};

/// Errors raised while building or loading a network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// A node with this id already exists
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// An edge references a node that isn't in the network
    #[error("edge references unknown node: {0}")]
    UnknownNode(NodeId),

    /// An edge starts and ends at the same node
    #[error("self-loop on node {0}")]
    SelfLoop(NodeId),

    /// An edge attribute is out of range
    #[error("invalid edge: {0}")]
    InvalidEdge(#[from] DomainError),

    /// Failed to read a network document
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Network document is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
