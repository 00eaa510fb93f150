//! Error types for loading and validating timelines.

use std::path::PathBuf;

use thiserror::Error;
use world_model::{Cycle, EntityId, EntityKind};

/// Errors raised while building the registry.
///
/// Queries never fail: an unknown id is reported as `None`, and a degraded
/// interpolation still yields a state.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Two keyframes of one entity share a time.
    #[error("entity {entity}: duplicate keyframe time {time}")]
    DuplicateTime { entity: EntityId, time: Cycle },

    /// An entity with this id is already registered.
    #[error("entity {0} is already registered")]
    DuplicateId(EntityId),

    #[error("entity {0} has no keyframes")]
    EmptyKeyframes(EntityId),

    #[error("entity {entity}: keyframe time {time} is not finite")]
    NonFiniteTime { entity: EntityId, time: Cycle },

    /// A keyframe's state does not match the entity's declared kind.
    #[error("entity {entity} is a {expected} but a keyframe at {time} holds a {found} state")]
    KindMismatch {
        entity: EntityId,
        expected: EntityKind,
        found: EntityKind,
        time: Cycle,
    },

    #[error("entity {entity}: invalid lifespan [{birth}, {death}]")]
    InvalidLifespan {
        entity: EntityId,
        birth: Cycle,
        death: Cycle,
    },

    /// A record or the whole data set could not be parsed.
    #[error("failed to parse data set: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl TimelineError {
    /// Creates a duplicate time error.
    pub fn duplicate_time(entity: &EntityId, time: Cycle) -> Self {
        Self::DuplicateTime {
            entity: entity.clone(),
            time,
        }
    }

    /// Creates a non-finite time error.
    pub fn non_finite(entity: &EntityId, time: Cycle) -> Self {
        Self::NonFiniteTime {
            entity: entity.clone(),
            time,
        }
    }
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;
