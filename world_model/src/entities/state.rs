//! The per-kind state carried by a keyframe.

use serde::{Deserialize, Serialize};

use super::{CharacterState, EntityKind, TerritoryState};
use crate::geometry::Point;

/// State of any entity at one point in time, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityState {
    Territory(TerritoryState),
    Character(CharacterState),
}

impl EntityState {
    /// The kind of entity this state belongs to.
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityState::Territory(_) => EntityKind::Territory,
            EntityState::Character(_) => EntityKind::Character,
        }
    }

    /// Point a relationship connector attaches to.
    ///
    /// Characters anchor at their position, territories at their capital.
    pub fn anchor(&self) -> Option<Point> {
        match self {
            EntityState::Territory(t) => t.capital,
            EntityState::Character(c) => Some(c.position),
        }
    }

    pub fn as_territory(&self) -> Option<&TerritoryState> {
        match self {
            EntityState::Territory(t) => Some(t),
            EntityState::Character(_) => None,
        }
    }

    pub fn as_character(&self) -> Option<&CharacterState> {
        match self {
            EntityState::Character(c) => Some(c),
            EntityState::Territory(_) => None,
        }
    }
}

impl From<TerritoryState> for EntityState {
    fn from(state: TerritoryState) -> Self {
        EntityState::Territory(state)
    }
}

impl From<CharacterState> for EntityState {
    fn from(state: CharacterState) -> Self {
        EntityState::Character(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ring;

    #[test]
    fn test_anchor_points() {
        let hero: EntityState = CharacterState::new(Point::new(2.0, 3.0), "Camp").into();
        assert_eq!(hero.kind(), EntityKind::Character);
        assert_eq!(hero.anchor(), Some(Point::new(2.0, 3.0)));

        let realm: EntityState = TerritoryState::new(Ring::default(), None, 10, "rising").into();
        assert_eq!(realm.kind(), EntityKind::Territory);
        assert_eq!(realm.anchor(), None);
        assert!(realm.as_character().is_none());
        assert_eq!(realm.as_territory().map(|t| t.population), Some(10));
    }

    #[test]
    fn test_tagged_serialization() {
        let state: EntityState = CharacterState::new(Point::new(1.0, 1.0), "Arrives").into();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["kind"], "character");
        assert_eq!(json["position"], serde_json::json!([1.0, 1.0]));
    }
}
