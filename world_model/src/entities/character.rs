//! Character journey snapshots.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Where a character is at one keyframe, and what happened there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub position: Point,
    /// Event description shown alongside the marker.
    #[serde(default)]
    pub label: String,
}

impl CharacterState {
    /// Create a character state.
    pub fn new(position: Point, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}
