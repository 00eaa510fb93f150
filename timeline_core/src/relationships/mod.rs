//! Relationship Deriver - where to draw a connector between two entities.
//!
//! Relationships are not stored. They are derived on demand from two
//! entities' overlapping lifespans and sampled at the middle of the overlap.

use serde::Serialize;

use world_model::{Cycle, EntityId, EntityKind, Lifespan, Point};

use crate::registry::{Entity, EntityRegistry};

/// An unordered pair of entities that may be connected on the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Relationship {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
}

impl Relationship {
    pub fn new(entity_a: impl Into<EntityId>, entity_b: impl Into<EntityId>) -> Self {
        Self {
            entity_a: entity_a.into(),
            entity_b: entity_b.into(),
        }
    }
}

/// Both endpoints of a connector at the sample time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipSample {
    pub relationship: Relationship,
    pub time: Cycle,
    pub pos_a: Point,
    pub pos_b: Point,
}

impl RelationshipSample {
    /// Length of the connector line.
    pub fn distance(&self) -> f64 {
        self.pos_a.distance(&self.pos_b)
    }
}

/// Window during which both entities exist; `None` if they never coexist.
pub fn overlap(a: &Entity, b: &Entity) -> Option<Lifespan> {
    a.lifespan().overlap(&b.lifespan())
}

/// Sample both entities at the midpoint of their shared window.
///
/// Returns `None` when either id is unknown, the lifespans do not overlap, or
/// a state has no anchor point (a territory without a capital).
pub fn sample_at(
    registry: &EntityRegistry,
    a: &EntityId,
    b: &EntityId,
) -> Option<RelationshipSample> {
    let entity_a = registry.get(a)?;
    let entity_b = registry.get(b)?;
    sample_entities(entity_a, entity_b)
}

fn sample_entities(a: &Entity, b: &Entity) -> Option<RelationshipSample> {
    let window = overlap(a, b)?;
    let time = window.midpoint();
    Some(RelationshipSample {
        relationship: Relationship::new(a.id().clone(), b.id().clone()),
        time,
        pos_a: a.state_at(time).anchor()?,
        pos_b: b.state_at(time).anchor()?,
    })
}

/// Every pair of `kind` entities that coexist, sampled, ordered by ids.
pub fn derive_all(registry: &EntityRegistry, kind: EntityKind) -> Vec<RelationshipSample> {
    let mut members: Vec<&Entity> = registry.entities().filter(|e| e.kind() == kind).collect();
    members.sort_by(|x, y| x.id().cmp(y.id()));

    let mut samples = Vec::new();
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            if let Some(sample) = sample_entities(a, b) {
                samples.push(sample);
            }
        }
    }
    samples
}
