//! Keyframe Store - one entity's keyframes, sorted by time.
//!
//! Filled once at load and read-only afterwards. The only query is
//! [`KeyframeStore::locate`], which finds the keyframes bracketing a time.

use world_model::{Cycle, EntityId, Keyframe, Lifespan};

use crate::config::DuplicateTimePolicy;
use crate::error::{Result, TimelineError};

/// The keyframes surrounding a query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket<'a> {
    /// The query is at or before the first keyframe.
    BeforeRange(&'a Keyframe),
    /// The query is at or after the last keyframe.
    AfterRange(&'a Keyframe),
    /// `before.time <= t < after.time`.
    Between {
        before: &'a Keyframe,
        after: &'a Keyframe,
    },
}

impl<'a> Bracket<'a> {
    /// Greatest keyframe at or before the query, if any.
    pub fn before(&self) -> Option<&'a Keyframe> {
        match *self {
            Bracket::BeforeRange(_) => None,
            Bracket::AfterRange(last) => Some(last),
            Bracket::Between { before, .. } => Some(before),
        }
    }

    /// Smallest keyframe strictly after the query, if any.
    pub fn after(&self) -> Option<&'a Keyframe> {
        match *self {
            Bracket::BeforeRange(first) => Some(first),
            Bracket::AfterRange(_) => None,
            Bracket::Between { after, .. } => Some(after),
        }
    }
}

/// Sorted, non-empty, duplicate-free keyframes of a single entity.
#[derive(Debug, Clone)]
pub struct KeyframeStore {
    entity: EntityId,
    frames: Vec<Keyframe>,
}

impl KeyframeStore {
    /// Sort keyframes by time, rejecting duplicate times.
    pub fn load(entity: EntityId, keyframes: Vec<Keyframe>) -> Result<Self> {
        Self::load_with_policy(entity, keyframes, DuplicateTimePolicy::Reject)
    }

    /// Sort keyframes by time, resolving duplicate times with `policy`.
    pub fn load_with_policy(
        entity: EntityId,
        mut keyframes: Vec<Keyframe>,
        policy: DuplicateTimePolicy,
    ) -> Result<Self> {
        if keyframes.is_empty() {
            return Err(TimelineError::EmptyKeyframes(entity));
        }
        if let Some(bad) = keyframes.iter().find(|k| !k.time.is_finite()) {
            return Err(TimelineError::non_finite(&entity, bad.time));
        }

        // Stable, so equal times keep their input order.
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut frames: Vec<Keyframe> = Vec::with_capacity(keyframes.len());
        for frame in keyframes {
            match frames.last_mut() {
                Some(prev) if prev.time == frame.time => match policy {
                    DuplicateTimePolicy::Reject => {
                        return Err(TimelineError::duplicate_time(&entity, frame.time));
                    }
                    DuplicateTimePolicy::KeepLast => {
                        tracing::debug!(
                            entity = %entity,
                            time = frame.time,
                            "duplicate keyframe time, keeping the later record"
                        );
                        *prev = frame;
                    }
                },
                _ => frames.push(frame),
            }
        }

        Ok(Self { entity, frames })
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    /// Find the keyframes bracketing `t`.
    ///
    /// A time equal to a keyframe's time selects that keyframe as `before`.
    /// A NaN time has no position on the timeline and clamps to the first keyframe.
    pub fn locate(&self, t: Cycle) -> Bracket<'_> {
        let first = self.first();
        let last = self.last();
        if t.is_nan() || t <= first.time {
            return Bracket::BeforeRange(first);
        }
        if t >= last.time {
            return Bracket::AfterRange(last);
        }
        // first.time < t < last.time, so 1 <= idx <= len - 1.
        let idx = self.frames.partition_point(|k| k.time <= t);
        Bracket::Between {
            before: &self.frames[idx - 1],
            after: &self.frames[idx],
        }
    }

    pub fn first(&self) -> &Keyframe {
        &self.frames[0]
    }

    pub fn last(&self) -> &Keyframe {
        &self.frames[self.frames.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: a store holds at least one keyframe.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.frames.iter()
    }

    /// Window from the first to the last keyframe.
    pub fn time_span(&self) -> Lifespan {
        Lifespan::new(self.first().time, self.last().time)
    }
}
