//! # World Model
//!
//! The "World Atlas" crate - entity identities, geometry and the keyframed
//! states that the timeline engine interpolates between.
//! This crate holds data only and does not contain any interpolation logic.

pub mod entities;
pub mod geometry;
pub mod timeline;

pub use entities::*;
pub use geometry::*;
pub use timeline::*;
