//! Hub identifier and node types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TransportMode;

/// Error returned when parsing an invalid node identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id: {reason}")]
pub struct InvalidNodeId {
    reason: &'static str,
}

/// Identifier of a hub in the transportation network.
///
/// Node ids are non-empty and carry no leading or trailing whitespace.
/// This type guarantees that any `NodeId` value is valid by construction.
///
/// # Examples
///
/// ```
/// use route_server::domain::NodeId;
///
/// let hub = NodeId::parse("NODE_005").unwrap();
/// assert_eq!(hub.as_str(), "NODE_005");
///
/// assert!(NodeId::parse("").is_err());
/// assert!(NodeId::parse(" NODE_005").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Parse a node id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidNodeId> {
        if s.is_empty() {
            return Err(InvalidNodeId {
                reason: "must not be empty",
            });
        }

        if s.trim() != s {
            return Err(InvalidNodeId {
                reason: "must not have surrounding whitespace",
            });
        }

        Ok(NodeId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = InvalidNodeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodeId::parse(&value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position of a hub (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A hub in the transportation network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// Optional location, used for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// The kind of traffic the hub mainly handles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_type: Option<TransportMode>,
}

impl Node {
    /// Create a node with no location or hub type.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            coordinates: None,
            hub_type: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.coordinates = Some(Coordinates { lat, lon });
        self
    }

    pub fn with_hub_type(mut self, hub_type: TransportMode) -> Self {
        self.hub_type = Some(hub_type);
        self
    }
}
