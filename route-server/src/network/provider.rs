//! Sources of the canonical network.
//!
//! Every request works on its own network value: providers hand out a fresh
//! baseline, and closures are applied to that copy rather than to anything
//! shared.

use std::path::Path;

use tracing::info;

use super::{ClosureSet, Network, NetworkDocument, NetworkError, prototype_network};

/// Trait for providing the baseline network.
///
/// This abstraction allows the server to run on the built-in prototype
/// topology or on persisted data without changing the routing code.
pub trait NetworkProvider: Send + Sync {
    /// Returns a new, independent copy of the baseline network.
    fn baseline(&self) -> Network;
}

/// Build the working network for one request.
///
/// Starts from the provider's baseline and removes the closed nodes and
/// links. Closures naming unknown hubs are ignored.
pub fn build_network<P: NetworkProvider + ?Sized>(provider: &P, closures: &ClosureSet) -> Network {
    let baseline = provider.baseline();
    if closures.is_empty() {
        return baseline;
    }
    baseline.without(closures)
}

/// The built-in prototype topology.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticNetwork;

impl NetworkProvider for SyntheticNetwork {
    fn baseline(&self) -> Network {
        prototype_network()
    }
}

/// A network loaded once from a JSON document.
#[derive(Debug, Clone)]
pub struct StoredNetwork {
    canonical: Network,
}

impl StoredNetwork {
    /// Wrap an already built network.
    pub fn new(canonical: Network) -> Self {
        Self { canonical }
    }

    /// Parse a network document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        Ok(Self::new(Network::from_document(document)?))
    }

    /// Read and parse a network document from disk.
    pub fn from_path(path: &Path) -> Result<Self, NetworkError> {
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stored = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            nodes = stored.canonical.node_count(),
            edges = stored.canonical.edge_count(),
            "Loaded network"
        );
        Ok(stored)
    }
}

impl NetworkProvider for StoredNetwork {
    fn baseline(&self) -> Network {
        self.canonical.clone()
    }
}
