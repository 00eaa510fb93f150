//! Data-set loader - builds an [`EntityRegistry`] from JSON.
//!
//! A bad entity is skipped and logged rather than failing the whole load.
//! Only a malformed top-level document is an error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use world_model::{
    CharacterState, Cycle, EntityId, EntityKind, EntityMeta, EntityState, Keyframe, Lifespan,
    TerritoryState,
};

use crate::config::LoadConfig;
use crate::error::{Result, TimelineError};
use crate::registry::{Entity, EntityRegistry};

/// Embedded world used when the backend fetch fails.
pub const BUILTIN_SAMPLE_WORLD: &str = include_str!("../data/sample_world.json");

/// A whole data set as delivered by the backend.
///
/// Entity records stay as raw JSON so that one malformed record is skipped on
/// its own instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataSet {
    pub entities: Vec<serde_json::Value>,
}

/// One entity as delivered by the backend.
///
/// Keyframes stay as raw JSON until the declared `kind` says how to read them.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRecord {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub kind: EntityKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "faction", alias = "type")]
    pub faction_or_type: String,
    #[serde(default, alias = "color")]
    pub display_color: Option<String>,
    #[serde(default)]
    pub lifespan: Option<Lifespan>,
    pub keyframes: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimedState<S> {
    time: Cycle,
    #[serde(flatten)]
    state: S,
}

/// An entity left out of the registry, and why.
#[derive(Debug)]
pub struct SkippedEntity {
    pub id: EntityId,
    pub reason: TimelineError,
}

/// Outcome of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedEntity>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl DataSet {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| TimelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// The embedded sample world.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(BUILTIN_SAMPLE_WORLD)
    }

    /// Build a registry, skipping entities that fail validation.
    pub fn into_registry(self, config: &LoadConfig) -> (EntityRegistry, LoadReport) {
        let mut registry = EntityRegistry::new();
        let mut report = LoadReport::default();

        for raw in self.entities {
            let id = raw
                .get("id")
                .and_then(serde_json::Value::as_str)
                .map(EntityId::from)
                .unwrap_or_else(EntityId::generate);
            let result = serde_json::from_value::<EntityRecord>(raw)
                .map_err(TimelineError::from)
                .and_then(|record| record.into_entity(id.clone(), config))
                .and_then(|entity| registry.add(entity));
            match result {
                Ok(()) => report.loaded += 1,
                Err(reason) => {
                    tracing::warn!(entity = %id, error = %reason, "skipping entity");
                    report.skipped.push(SkippedEntity { id, reason });
                }
            }
        }

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded entity registry"
        );
        (registry, report)
    }
}

impl EntityRecord {
    /// Decode keyframes for the declared kind and validate the entity.
    ///
    /// Without an explicit lifespan the entity lives from its first to its
    /// last keyframe.
    pub fn into_entity(self, id: EntityId, config: &LoadConfig) -> Result<Entity> {
        let keyframes = match self.kind {
            EntityKind::Territory => decode_keyframes::<TerritoryState>(self.keyframes)?,
            EntityKind::Character => decode_keyframes::<CharacterState>(self.keyframes)?,
        };

        let lifespan = match self.lifespan {
            Some(lifespan) => lifespan,
            None => keyframe_span(&keyframes)
                .ok_or_else(|| TimelineError::EmptyKeyframes(id.clone()))?,
        };

        let mut meta = EntityMeta::new(id, self.kind, self.faction_or_type, lifespan);
        if let Some(name) = self.name {
            meta = meta.with_name(name);
        }
        if let Some(color) = self.display_color {
            meta = meta.with_color(color);
        }
        Entity::with_policy(meta, keyframes, config.duplicate_times)
    }
}

fn decode_keyframes<S>(raw: Vec<serde_json::Value>) -> Result<Vec<Keyframe>>
where
    S: DeserializeOwned + Into<EntityState>,
{
    raw.into_iter()
        .map(|value| -> Result<Keyframe> {
            let timed: TimedState<S> = serde_json::from_value(value)?;
            Ok(Keyframe::new(timed.time, timed.state))
        })
        .collect()
}

fn keyframe_span(keyframes: &[Keyframe]) -> Option<Lifespan> {
    let first = keyframes.iter().map(|k| k.time).reduce(f64::min)?;
    let last = keyframes.iter().map(|k| k.time).reduce(f64::max)?;
    Some(Lifespan::new(first, last))
}

/// Parse JSON and build a registry in one step.
pub fn load_registry(json: &str, config: &LoadConfig) -> Result<(EntityRegistry, LoadReport)> {
    Ok(DataSet::from_json_str(json)?.into_registry(config))
}

pub fn load_registry_from_file(
    path: &Path,
    config: &LoadConfig,
) -> Result<(EntityRegistry, LoadReport)> {
    Ok(DataSet::from_file(path)?.into_registry(config))
}

/// Load from `json`, falling back to the embedded sample world if it does not parse.
pub fn load_registry_or_sample(
    json: &str,
    config: &LoadConfig,
) -> Result<(EntityRegistry, LoadReport)> {
    match load_registry(json, config) {
        Ok(loaded) => Ok(loaded),
        Err(err) => {
            tracing::warn!(error = %err, "data set unreadable, using embedded sample world");
            Ok(DataSet::sample()?.into_registry(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateTimePolicy;
    use world_model::Point;

    #[test]
    fn test_sample_world_loads_cleanly() {
        let (registry, report) = DataSet::sample().unwrap().into_registry(&LoadConfig::default());

        assert!(report.is_clean());
        assert_eq!(report.loaded, 4);
        assert_eq!(registry.len(), 4);

        let realm = registry.get(&EntityId::from("northern_realm")).unwrap();
        assert_eq!(realm.meta.name, "Northern Realm");
        assert_eq!(realm.meta.faction_or_type, "north_alliance");
        assert_eq!(realm.meta.display_color, "#3366cc");
        assert_eq!(realm.keyframes().len(), 3);
    }

    #[test]
    fn test_missing_lifespan_uses_keyframe_span() {
        let (registry, _) = DataSet::sample().unwrap().into_registry(&LoadConfig::default());

        let bran = registry.get(&EntityId::from("bran")).unwrap();
        assert_eq!(bran.lifespan(), Lifespan::new(100.0, 140.0));
        assert_eq!(bran.meta.faction_or_type, "scholar");
        assert_eq!(bran.meta.display_color, EntityKind::Character.default_color());
    }

    #[test]
    fn test_bad_entities_are_skipped() {
        let json = r#"{ "entities": [
            { "id": "ok", "kind": "character",
              "keyframes": [ { "time": 0, "position": [0, 0], "label": "a" } ] },
            { "id": "dupe_time", "kind": "character",
              "keyframes": [ { "time": 1, "position": [0, 0] },
                             { "time": 1, "position": [1, 1] } ] },
            { "id": "wrong_shape", "kind": "territory",
              "keyframes": [ { "time": 0, "position": [0, 0] } ] },
            { "id": "empty", "kind": "character", "keyframes": [] },
            { "id": "ok", "kind": "character",
              "keyframes": [ { "time": 5, "position": [0, 0] } ] }
        ] }"#;

        let (registry, report) = load_registry(json, &LoadConfig::default()).unwrap();

        assert_eq!(registry.ids(), vec![EntityId::from("ok")]);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 4);
        assert!(matches!(report.skipped[0].reason, TimelineError::DuplicateTime { .. }));
        assert!(matches!(report.skipped[1].reason, TimelineError::Parse(_)));
        assert!(matches!(report.skipped[2].reason, TimelineError::EmptyKeyframes(_)));
        assert!(matches!(report.skipped[3].reason, TimelineError::DuplicateId(_)));
    }

    #[test]
    fn test_malformed_record_does_not_sink_the_rest() {
        let json = r#"{ "entities": [
            { "id": "ok", "kind": "character",
              "keyframes": [ { "time": 0, "position": [0, 0] } ] },
            { "id": "bad", "kind": "castle",
              "keyframes": [ { "time": 0, "position": [0, 0] } ] },
            { "id": "no_frames", "kind": "character" },
            { "id": "odd_span", "kind": "character", "lifespan": "forever",
              "keyframes": [ { "time": 0, "position": [0, 0] } ] }
        ] }"#;

        let (registry, report) = load_registry(json, &LoadConfig::default()).unwrap();

        assert_eq!(registry.ids(), vec![EntityId::from("ok")]);
        assert_eq!(report.loaded, 1);
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(skipped, vec!["bad", "no_frames", "odd_span"]);
        assert!(report
            .skipped
            .iter()
            .all(|s| matches!(s.reason, TimelineError::Parse(_))));
    }

    #[test]
    fn test_keep_last_duplicate_policy() {
        let json = r#"{ "entities": [
            { "id": "aria", "kind": "character",
              "keyframes": [ { "time": 1, "position": [0, 0], "label": "first" },
                             { "time": 1, "position": [9, 9], "label": "second" } ] }
        ] }"#;
        let config = LoadConfig {
            duplicate_times: DuplicateTimePolicy::KeepLast,
        };

        let (registry, report) = load_registry(json, &config).unwrap();
        assert!(report.is_clean());
        let state = registry.state_at(&EntityId::from("aria"), 1.0).unwrap();
        assert_eq!(state.anchor(), Some(Point::new(9.0, 9.0)));
    }

    #[test]
    fn test_missing_id_is_generated() {
        let json = r#"{ "entities": [
            { "kind": "character", "keyframes": [ { "time": 0, "position": [1, 2] } ] }
        ] }"#;
        let (registry, _) = load_registry(json, &LoadConfig::default()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.ids()[0].as_str().len(), 36);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = load_registry("{ not json", &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, TimelineError::Parse(_)));
    }

    #[test]
    fn test_fallback_to_sample_world() {
        let (registry, report) =
            load_registry_or_sample("{ not json", &LoadConfig::default()).unwrap();
        assert_eq!(report.loaded, 4);
        assert!(registry.contains(&EntityId::from("aria")));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/world.json");
        let err = load_registry_from_file(path, &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, TimelineError::Read { .. }));
    }
}
