//! Cargo handling classes.

use serde::{Deserialize, Serialize};

/// Handling class of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoClass {
    Standard,
    Express,
    Fragile,
}
