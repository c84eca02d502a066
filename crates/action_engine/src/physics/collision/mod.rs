//! Narrow-phase collision detection
//!
//! Shapes are stored relative to their owner and only transformed to world
//! space while a test runs.
//!
//! # Module Organization
//!
//! - [`primitives`] - Spheres, boxes, capsules and closest-point helpers
//! - [`shape`] - World-space shape enum dispatched by the narrow phase
//! - [`detection`] - Boolean and penetration tests for every shape pair

pub mod primitives;
pub mod shape;
pub mod detection;

pub use primitives::{Aabb, BoundingSphere, Capsule, OrientedBox};
pub use shape::{ShapeKind, WorldShape};
pub use detection::{intersects, penetration};
