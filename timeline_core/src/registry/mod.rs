//! Entity Registry - owns every entity and answers "the world at time T".

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use world_model::{Cycle, EntityId, EntityKind, EntityMeta, EntityState, Keyframe, Lifespan};

use crate::config::DuplicateTimePolicy;
use crate::error::{Result, TimelineError};
use crate::interpolator;
use crate::keyframe_store::KeyframeStore;

/// An entity: static metadata plus its own keyframes.
#[derive(Debug, Clone)]
pub struct Entity {
    pub meta: EntityMeta,
    keyframes: KeyframeStore,
}

impl Entity {
    /// Build an entity, rejecting duplicate keyframe times.
    pub fn new(meta: EntityMeta, keyframes: Vec<Keyframe>) -> Result<Self> {
        Self::with_policy(meta, keyframes, DuplicateTimePolicy::Reject)
    }

    /// Build an entity, checking that every keyframe matches the declared
    /// kind and that the lifespan is well formed.
    pub fn with_policy(
        meta: EntityMeta,
        keyframes: Vec<Keyframe>,
        policy: DuplicateTimePolicy,
    ) -> Result<Self> {
        if !meta.lifespan.is_valid() {
            return Err(TimelineError::InvalidLifespan {
                entity: meta.id.clone(),
                birth: meta.lifespan.birth,
                death: meta.lifespan.death,
            });
        }
        if let Some(bad) = keyframes.iter().find(|k| k.state.kind() != meta.kind) {
            return Err(TimelineError::KindMismatch {
                entity: meta.id.clone(),
                expected: meta.kind,
                found: bad.state.kind(),
                time: bad.time,
            });
        }
        let keyframes = KeyframeStore::load_with_policy(meta.id.clone(), keyframes, policy)?;
        Ok(Self { meta, keyframes })
    }

    pub fn id(&self) -> &EntityId {
        &self.meta.id
    }

    pub fn kind(&self) -> EntityKind {
        self.meta.kind
    }

    pub fn lifespan(&self) -> Lifespan {
        self.meta.lifespan
    }

    pub fn keyframes(&self) -> &KeyframeStore {
        &self.keyframes
    }

    /// Interpolated state at `t`.
    pub fn state_at(&self, t: Cycle) -> EntityState {
        interpolator::interpolate(self.keyframes.locate(t), t)
    }

    pub fn is_alive_at(&self, t: Cycle) -> bool {
        self.meta.lifespan.contains(t)
    }
}

/// One entity's state within a world snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub state: EntityState,
}

/// All entities, indexed by id.
///
/// Filled once per data set; reloading replaces the whole registry.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<EntityId, Entity>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity.
    pub fn add(&mut self, entity: Entity) -> Result<()> {
        if self.entities.contains_key(entity.id()) {
            return Err(TimelineError::DuplicateId(entity.id().clone()));
        }
        self.entities.insert(entity.id().clone(), entity);
        Ok(())
    }

    /// Get entity by ID.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Interpolated state of an entity at `t`; `None` for unknown ids.
    pub fn state_at(&self, id: &EntityId, t: Cycle) -> Option<EntityState> {
        self.get(id).map(|entity| entity.state_at(t))
    }

    /// Ids of entities whose lifespan contains `t`, sorted.
    pub fn alive_at(&self, t: Cycle) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .entities
            .values()
            .filter(|e| e.is_alive_at(t))
            .map(|e| e.id().clone())
            .collect();
        ids.sort();
        ids
    }

    /// States of every entity alive at `t`, sorted by id.
    pub fn world_at(&self, t: Cycle) -> Vec<EntitySnapshot> {
        self.alive_at(t)
            .into_iter()
            .filter_map(|id| {
                let state = self.state_at(&id, t)?;
                Some(EntitySnapshot { id, state })
            })
            .collect()
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.entities.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Earliest birth to latest death over all entities.
    pub fn time_span(&self) -> Option<Lifespan> {
        self.entities.values().map(Entity::lifespan).reduce(|acc, span| {
            Lifespan::new(acc.birth.min(span.birth), acc.death.max(span.death))
        })
    }

    /// Ids of entities belonging to a faction (or character type), sorted.
    pub fn by_faction(&self, faction: &str) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .entities
            .values()
            .filter(|e| e.meta.faction_or_type == faction)
            .map(|e| e.id().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Distinct factions and character types.
    pub fn factions(&self) -> BTreeSet<&str> {
        self.entities
            .values()
            .map(|e| e.meta.faction_or_type.as_str())
            .collect()
    }

    /// Total interpolated population of a faction's living territories at `t`.
    pub fn faction_population_at(&self, faction: &str, t: Cycle) -> i64 {
        self.entities
            .values()
            .filter(|e| e.meta.faction_or_type == faction && e.is_alive_at(t))
            .filter_map(|e| e.state_at(t).as_territory().map(|s| s.population))
            .sum()
    }

    /// Swap in a freshly loaded registry, discarding the current one.
    pub fn replace_with(&mut self, other: EntityRegistry) {
        tracing::info!(
            previous = self.entities.len(),
            current = other.entities.len(),
            "replacing entity registry"
        );
        *self = other;
    }
}
