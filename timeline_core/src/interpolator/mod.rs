//! Temporal Interpolator - blends two keyframes into the state at a query time.
//!
//! Field policy:
//! - population: linear, rounded to the nearest integer
//! - capital: taken from the earlier keyframe
//! - boundary: vertex-wise linear; mismatched vertex counts keep the earlier ring
//! - status / label: earlier value while progress < 0.5, later value from 0.5 on
//! - character position: linear on both coordinates

mod easing;

pub use easing::*;

use world_model::{geometry, CharacterState, Cycle, EntityState, Keyframe, TerritoryState};

use crate::keyframe_store::Bracket;

/// Progress at which categorical fields switch to the later keyframe.
pub const CATEGORICAL_SWITCH: f64 = 0.5;

/// Normalized position of `t` between two keyframe times, clamped to `[0, 1]`.
pub fn progress(before: Cycle, after: Cycle, t: Cycle) -> f64 {
    let span = after - before;
    if span <= 0.0 {
        return 0.0;
    }
    ((t - before) / span).clamp(0.0, 1.0)
}

/// State at time `t` given the keyframes bracketing it.
///
/// Out-of-range queries return the nearest endpoint unchanged.
pub fn interpolate(bracket: Bracket<'_>, t: Cycle) -> EntityState {
    match bracket {
        Bracket::BeforeRange(first) => first.state.clone(),
        Bracket::AfterRange(last) => last.state.clone(),
        Bracket::Between { before, after } => blend(before, after, t),
    }
}

/// Blend two keyframes at time `t`.
pub fn blend(before: &Keyframe, after: &Keyframe, t: Cycle) -> EntityState {
    let p = progress(before.time, after.time, t);
    if p == 0.0 {
        return before.state.clone();
    }
    match (&before.state, &after.state) {
        (EntityState::Territory(a), EntityState::Territory(b)) => {
            EntityState::Territory(blend_territory(a, b, p))
        }
        (EntityState::Character(a), EntityState::Character(b)) => {
            EntityState::Character(blend_character(a, b, p))
        }
        // Rejected at load; keep the earlier state if it ever happens.
        _ => before.state.clone(),
    }
}

/// Blend two territory snapshots at progress `p`.
pub fn blend_territory(a: &TerritoryState, b: &TerritoryState, p: f64) -> TerritoryState {
    let boundary = match a.boundary.lerp(&b.boundary, p) {
        Some(ring) => ring,
        None => {
            tracing::trace!(
                before = a.boundary.len(),
                after = b.boundary.len(),
                "boundary vertex counts differ, holding earlier boundary"
            );
            a.boundary.clone()
        }
    };
    TerritoryState {
        boundary,
        capital: a.capital,
        population: lerp_integer(a.population, b.population, p),
        status: switch(&a.status, &b.status, p).clone(),
    }
}

/// Blend two character snapshots at progress `p`.
pub fn blend_character(a: &CharacterState, b: &CharacterState, p: f64) -> CharacterState {
    CharacterState {
        position: a.position.lerp(&b.position, p),
        label: switch(&a.label, &b.label, p).clone(),
    }
}

fn lerp_integer(a: i64, b: i64, p: f64) -> i64 {
    geometry::lerp(a as f64, b as f64, p).round() as i64
}

fn switch<'a, T>(before: &'a T, after: &'a T, p: f64) -> &'a T {
    if p < CATEGORICAL_SWITCH {
        before
    } else {
        after
    }
}
