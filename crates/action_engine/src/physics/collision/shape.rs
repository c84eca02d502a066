//! World-space collision shapes
//!
//! Colliders store their geometry relative to the owning object and are
//! projected into a [`WorldShape`] on demand before every test.

use super::primitives::{Aabb, BoundingSphere, Capsule, OrientedBox};

/// Shape category, independent of size and placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Sphere
    Sphere,
    /// Box rotated with its owner
    Box,
    /// Box aligned with the world axes
    Aabb,
    /// Capsule along the owner's local Y axis
    Capsule,
}

/// Temporary world-space shape used by the narrow phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// Sphere
    Sphere(BoundingSphere),
    /// Oriented box
    Box(OrientedBox),
    /// Axis-aligned box
    Aabb(Aabb),
    /// Capsule
    Capsule(Capsule),
}

impl WorldShape {
    /// Shape category
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::Box(_) => ShapeKind::Box,
            Self::Aabb(_) => ShapeKind::Aabb,
            Self::Capsule(_) => ShapeKind::Capsule,
        }
    }
}
