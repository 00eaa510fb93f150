//! Playback / Scrub Controller - moves a time cursor and captures the world
//! at each step.
//!
//! The controller has no timers of its own. The caller passes the current
//! clock reading (`now_ms`) to [`PlaybackController::tick`], so a test can
//! step an animation deterministically.

use serde::Serialize;

use world_model::{geometry, Cycle};

use crate::config::{BusyPolicy, PlaybackConfig};
use crate::interpolator::ease_in_out_quad;
use crate::registry::{EntityRegistry, EntitySnapshot};

/// The world as rendered for one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: Cycle,
    /// States of the entities alive at `time`, sorted by id.
    pub states: Vec<EntitySnapshot>,
}

impl Frame {
    /// Query every living entity at `time`.
    pub fn capture(registry: &EntityRegistry, time: Cycle) -> Self {
        Self {
            time,
            states: registry.world_at(time),
        }
    }
}

/// What `animate_to` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Nothing was running; the animation started.
    Started,
    /// A running animation was cancelled and replaced.
    Restarted,
    /// A running animation was kept and the request dropped.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: Cycle,
    to: Cycle,
    started_at_ms: u64,
    duration_ms: u64,
}

impl Animation {
    /// Eased time after `elapsed_ms`, and whether the animation is over.
    fn time_at(&self, elapsed_ms: u64) -> (Cycle, bool) {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return (self.to, true);
        }
        let linear = elapsed_ms as f64 / self.duration_ms as f64;
        (geometry::lerp(self.from, self.to, ease_in_out_quad(linear)), false)
    }
}

/// Drives a single time cursor; at most one animation is in flight.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    cursor: Cycle,
    animation: Option<Animation>,
    config: PlaybackConfig,
}

impl PlaybackController {
    /// Create a controller with its cursor at `start`.
    pub fn new(start: Cycle, config: PlaybackConfig) -> Self {
        Self {
            cursor: start,
            animation: None,
            config,
        }
    }

    /// Create a controller with default configuration.
    pub fn with_defaults(start: Cycle) -> Self {
        Self::new(start, PlaybackConfig::default())
    }

    pub fn cursor(&self) -> Cycle {
        self.cursor
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final time of the running animation.
    pub fn target(&self) -> Option<Cycle> {
        self.animation.map(|a| a.to)
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Start animating from the cursor to `target` over `duration_ms`.
    ///
    /// If an animation is already running, the configured [`BusyPolicy`]
    /// decides whether it is replaced or the request is dropped. A replacement
    /// starts from where the running animation is at `now_ms`, even if no tick
    /// has rendered that time yet.
    pub fn animate_to(&mut self, target: Cycle, duration_ms: u64, now_ms: u64) -> StartOutcome {
        let outcome = match (self.animation, self.config.busy_policy) {
            (None, _) => StartOutcome::Started,
            (Some(_), BusyPolicy::IgnoreIfBusy) => {
                tracing::debug!(target_time = target, "animation in flight, ignoring request");
                return StartOutcome::Ignored;
            }
            (Some(running), BusyPolicy::CancelAndRestart) => {
                let (live, _) = running.time_at(now_ms.saturating_sub(running.started_at_ms));
                self.cursor = live;
                tracing::debug!(
                    cancelled_target = running.to,
                    target_time = target,
                    cursor = self.cursor,
                    "restarting animation"
                );
                StartOutcome::Restarted
            }
        };

        self.animation = Some(Animation {
            from: self.cursor,
            to: target,
            started_at_ms: now_ms,
            duration_ms,
        });
        outcome
    }

    /// `animate_to` with the configured default duration.
    pub fn animate_to_default(&mut self, target: Cycle, now_ms: u64) -> StartOutcome {
        self.animate_to(target, self.config.default_duration_ms, now_ms)
    }

    /// Stop the running animation, leaving the cursor where it is.
    ///
    /// Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        self.animation.take().is_some()
    }

    /// Advance the running animation to `now_ms` and capture the world at the
    /// eased intermediate time.
    ///
    /// The final tick lands exactly on the target and ends the animation.
    /// Returns `None` when idle.
    pub fn tick(&mut self, registry: &EntityRegistry, now_ms: u64) -> Option<Frame> {
        let animation = self.animation?;
        let (time, finished) = animation.time_at(now_ms.saturating_sub(animation.started_at_ms));

        self.cursor = time;
        if finished {
            self.animation = None;
        }
        Some(Frame::capture(registry, time))
    }

    /// Move straight to `target` without animating, cancelling any animation.
    pub fn jump_to(&mut self, registry: &EntityRegistry, target: Cycle) -> Frame {
        self.cancel();
        self.cursor = target;
        Frame::capture(registry, target)
    }

    /// Tick at the configured fixed interval until the animation finishes.
    pub fn run(&mut self, registry: &EntityRegistry, start_ms: u64) -> Vec<Frame> {
        let interval = self.config.tick_interval_ms.max(1);
        let mut frames = Vec::new();
        let mut now = start_ms;
        while let Some(frame) = self.tick(registry, now) {
            frames.push(frame);
            now = now.saturating_add(interval);
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use world_model::{
        CharacterState, EntityId, EntityKind, EntityMeta, Keyframe, Lifespan, Point,
    };

    use crate::registry::Entity;

    fn hero(id: &str, birth: Cycle, death: Cycle, stops: &[(Cycle, Point, &str)]) -> Entity {
        let keyframes = stops
            .iter()
            .map(|(time, at, label)| Keyframe::new(*time, CharacterState::new(*at, *label)))
            .collect();
        let meta = EntityMeta::new(id, EntityKind::Character, "hero", Lifespan::new(birth, death));
        Entity::new(meta, keyframes).unwrap()
    }

    fn registry() -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        let aria = hero(
            "aria",
            0.0,
            100.0,
            &[
                (0.0, Point::new(0.0, 0.0), "Departs"),
                (100.0, Point::new(100.0, 0.0), "Arrives"),
            ],
        );
        let bran = hero("bran", 60.0, 100.0, &[(60.0, Point::new(5.0, 5.0), "Born")]);
        registry.add(aria).unwrap();
        registry.add(bran).unwrap();
        registry
    }

    fn aria_x(frame: &Frame) -> f64 {
        frame
            .states
            .iter()
            .find(|s| s.id == EntityId::from("aria"))
            .and_then(|s| s.state.anchor())
            .unwrap()
            .x
    }

    #[test]
    fn test_idle_tick_returns_none() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);
        assert!(controller.tick(&registry, 0).is_none());
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_animation_uses_eased_intermediate_time() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);

        assert_eq!(controller.animate_to(100.0, 1000, 0), StartOutcome::Started);
        assert_eq!(controller.target(), Some(100.0));

        let quarter = controller.tick(&registry, 250).unwrap();
        assert_relative_eq!(quarter.time, 12.5);
        assert_relative_eq!(aria_x(&quarter), 12.5);
        assert_eq!(quarter.states.len(), 1);

        let half = controller.tick(&registry, 500).unwrap();
        assert_relative_eq!(half.time, 50.0);
        assert!(controller.is_animating());

        let late = controller.tick(&registry, 750).unwrap();
        assert_relative_eq!(late.time, 87.5);
        // bran is born at cycle 60.
        assert_eq!(late.states.len(), 2);

        let done = controller.tick(&registry, 1000).unwrap();
        assert_eq!(done.time, 100.0);
        assert!(!controller.is_animating());
        assert_eq!(controller.cursor(), 100.0);
        assert!(controller.tick(&registry, 1100).is_none());
    }

    #[test]
    fn test_restart_cancels_previous() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);

        controller.animate_to(100.0, 1000, 0);
        controller.tick(&registry, 500);
        assert_relative_eq!(controller.cursor(), 50.0);

        assert_eq!(controller.animate_to(0.0, 100, 500), StartOutcome::Restarted);
        assert_eq!(controller.target(), Some(0.0));

        let frame = controller.tick(&registry, 550).unwrap();
        assert_relative_eq!(frame.time, 25.0);

        let frame = controller.tick(&registry, 600).unwrap();
        assert_eq!(frame.time, 0.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_restart_between_ticks_starts_from_live_time() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);

        controller.animate_to(100.0, 1000, 0);
        controller.tick(&registry, 250);
        assert_relative_eq!(controller.cursor(), 12.5);

        // No tick at 500, yet the running animation is already at cycle 50.
        assert_eq!(controller.animate_to(0.0, 100, 500), StartOutcome::Restarted);
        assert_relative_eq!(controller.cursor(), 50.0);

        let frame = controller.tick(&registry, 550).unwrap();
        assert_relative_eq!(frame.time, 25.0);
    }

    #[test]
    fn test_run_does_not_overflow_clock() {
        let registry = registry();
        let config = PlaybackConfig {
            tick_interval_ms: u64::MAX,
            ..Default::default()
        };
        let mut controller = PlaybackController::new(0.0, config);
        controller.animate_to(100.0, 1000, 10);

        let frames = controller.run(&registry, 10);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].time, 100.0);
    }

    #[test]
    fn test_ignore_if_busy_drops_request() {
        let registry = registry();
        let config = PlaybackConfig {
            busy_policy: BusyPolicy::IgnoreIfBusy,
            ..Default::default()
        };
        let mut controller = PlaybackController::new(0.0, config);

        controller.animate_to(100.0, 1000, 0);
        assert_eq!(controller.animate_to(10.0, 10, 100), StartOutcome::Ignored);
        assert_eq!(controller.target(), Some(100.0));

        let frame = controller.tick(&registry, 1000).unwrap();
        assert_eq!(frame.time, 100.0);
    }

    #[test]
    fn test_cancel_keeps_cursor() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);

        assert!(!controller.cancel());
        controller.animate_to(100.0, 1000, 0);
        controller.tick(&registry, 500);
        assert!(controller.cancel());
        assert!(!controller.is_animating());
        assert_relative_eq!(controller.cursor(), 50.0);
    }

    #[test]
    fn test_jump_to_is_immediate() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);
        controller.animate_to(100.0, 1000, 0);

        let frame = controller.jump_to(&registry, 80.0);
        assert_eq!(frame.time, 80.0);
        assert_relative_eq!(aria_x(&frame), 80.0);
        assert!(!controller.is_animating());
        assert_eq!(controller.cursor(), 80.0);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let registry = registry();
        let mut controller = PlaybackController::with_defaults(0.0);
        controller.animate_to(30.0, 0, 10);

        let frame = controller.tick(&registry, 10).unwrap();
        assert_eq!(frame.time, 30.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_run_at_fixed_interval() {
        let registry = registry();
        let config = PlaybackConfig {
            tick_interval_ms: 100,
            ..Default::default()
        };
        let mut controller = PlaybackController::new(0.0, config);
        controller.animate_to_default(100.0, 0);

        let frames = controller.run(&registry, 0);
        assert_eq!(frames.len(), 11);
        assert_eq!(frames[0].time, 0.0);
        assert_eq!(frames[10].time, 100.0);
        assert!(frames.windows(2).all(|w| w[0].time <= w[1].time));
    }
}
