//! # Timeline Core
//!
//! The temporal engine behind the world atlas. Given keyframed snapshots of
//! territories and characters, it answers "what does the world look like at
//! cycle T" and drives animated playback through time.
//!
//! ## Core Components
//!
//! - **keyframe_store**: Per-entity sorted keyframes and bracketing lookup
//! - **interpolator**: Blends two keyframes into the state at a query time
//! - **registry**: Owns all entities; `state_at`, `alive_at`, world snapshots
//! - **relationships**: Shared-lifetime sampling for connector lines
//! - **playback**: Cancellable, clock-driven animation of the time cursor
//! - **loader**: Builds a registry from a JSON data set
//!
//! ## Design Philosophy
//!
//! - **Read-only queries**: Keyframes are fixed after load and queries never mutate them
//! - **Graceful degradation**: Bad entities are skipped; odd geometry keeps the earlier state
//! - **Explicit wiring**: Registry and controller are plain values handed to the renderer

pub mod config;
pub mod error;
pub mod interpolator;
pub mod keyframe_store;
pub mod loader;
pub mod playback;
pub mod registry;
pub mod relationships;

pub use config::*;
pub use error::*;
pub use interpolator::*;
pub use keyframe_store::*;
pub use loader::*;
pub use playback::*;
pub use registry::*;
pub use relationships::*;
