//! Time coordinates, lifespans and keyframes.

use serde::{Deserialize, Serialize};

use crate::entities::EntityState;

/// The domain's time unit: a fractional cycle, analogous to a calendar year.
pub type Cycle = f64;

/// Inclusive `[birth, death]` window during which an entity exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifespan {
    pub birth: Cycle,
    pub death: Cycle,
}

impl Lifespan {
    pub fn new(birth: Cycle, death: Cycle) -> Self {
        Self { birth, death }
    }

    /// Whether `t` lies within the lifespan, both ends included.
    pub fn contains(&self, t: Cycle) -> bool {
        t >= self.birth && t <= self.death
    }

    pub fn duration(&self) -> Cycle {
        self.death - self.birth
    }

    /// Shared window of two lifespans.
    ///
    /// Returns `None` when the windows only touch or do not meet at all.
    pub fn overlap(&self, other: &Lifespan) -> Option<Lifespan> {
        let start = self.birth.max(other.birth);
        let end = self.death.min(other.death);
        if start >= end {
            None
        } else {
            Some(Lifespan::new(start, end))
        }
    }

    /// Middle of the window.
    pub fn midpoint(&self) -> Cycle {
        (self.birth + self.death) / 2.0
    }

    pub fn is_valid(&self) -> bool {
        self.birth.is_finite() && self.death.is_finite() && self.birth <= self.death
    }
}

/// A timestamped snapshot of an entity's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: Cycle,
    pub state: EntityState,
}

impl Keyframe {
    pub fn new(time: Cycle, state: impl Into<EntityState>) -> Self {
        Self {
            time,
            state: state.into(),
        }
    }
}
