//! Entity definitions for the world atlas.

mod character;
mod state;
mod territory;

pub use character::*;
pub use state::*;
pub use territory::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timeline::Lifespan;

/// Unique identifier for every entity on the map.
///
/// Backend records carry human-readable ids such as `"kingdom_north"`, so the
/// id is a string rather than a bare UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an entity ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random ID for records that arrive without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of entities tracked over time.
///
/// Decided when an entity is loaded, never inferred from payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Territory,
    Character,
}

impl EntityKind {
    /// Colour used when a record does not specify one.
    pub fn default_color(&self) -> &'static str {
        match self {
            EntityKind::Territory => "#888888",
            EntityKind::Character => "#e6a817",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Territory => "territory",
            EntityKind::Character => "character",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata of an entity, separate from its keyframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    /// Faction for territories, character type for characters.
    pub faction_or_type: String,
    pub display_color: String,
    pub lifespan: Lifespan,
}

impl EntityMeta {
    /// Create metadata with the name defaulting to the id and the kind's default colour.
    pub fn new(
        id: impl Into<EntityId>,
        kind: EntityKind,
        faction_or_type: impl Into<String>,
        lifespan: Lifespan,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            kind,
            faction_or_type: faction_or_type.into(),
            display_color: kind.default_color().to_string(),
            lifespan,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.display_color = color.into();
        self
    }
}
