//! Territory snapshots.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Ring};

/// State of a faction's territory at one keyframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryState {
    pub boundary: Ring,
    /// None when the faction has no seat of power at this time.
    #[serde(default)]
    pub capital: Option<Point>,
    pub population: i64,
    /// Free-form phase label such as "rising", "peak" or "decline".
    pub status: String,
}

impl TerritoryState {
    /// Create a territory state.
    pub fn new(
        boundary: Ring,
        capital: Option<Point>,
        population: i64,
        status: impl Into<String>,
    ) -> Self {
        Self {
            boundary,
            capital,
            population,
            status: status.into(),
        }
    }
}
