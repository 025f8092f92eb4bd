//! Transport modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0:?}")]
pub struct InvalidTransportMode(pub String);

/// The way a leg of the network is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Road,
    Rail,
    Air,
    Sea,
}

impl TransportMode {
    /// All modes, in declaration order.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Road,
        TransportMode::Rail,
        TransportMode::Air,
        TransportMode::Sea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Road => "road",
            TransportMode::Rail => "rail",
            TransportMode::Air => "air",
            TransportMode::Sea => "sea",
        }
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| InvalidTransportMode(s.to_string()))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
