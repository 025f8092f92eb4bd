//! Transportation network model.
//!
//! Hubs joined by mode-specific legs, the closures used to model outages,
//! and the providers that hand out a fresh network per request.

mod builder;
mod closure;
mod error;
mod graph;
mod provider;

pub use builder::{
    NetworkBuilder, PROTOTYPE_NODE_COUNT, prototype_network, prototype_node_name,
};
pub use closure::ClosureSet;
pub use error::NetworkError;
pub use graph::{Edge, EdgeIndex, EdgeSpec, Network, NetworkDocument, NodeIndex};
pub use provider::{NetworkProvider, StoredNetwork, SyntheticNetwork, build_network};
