//! Colliders attached to scene objects
//!
//! A [`Collider`] stores its shape relative to the owning object. Before any
//! test it is projected through the owner's world [`Pose`] into a
//! [`WorldShape`]; the owner's scale never enlarges the collider.

use serde::{Deserialize, Serialize};

use crate::debug::DebugShape;
use crate::foundation::math::{Pose, Vec3, Vec4};
use super::collision::detection;
use super::collision::primitives::{Aabb, BoundingSphere, Capsule, OrientedBox};
use super::collision::{ShapeKind, WorldShape};

/// Collider geometry in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere around the collider center
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Box that rotates with its owner
    Box {
        /// Half size along the owner's local axes
        half_extents: Vec3,
    },
    /// Box that always stays aligned with the world axes
    Aabb {
        /// Half size along the world axes
        half_extents: Vec3,
    },
    /// Capsule along the owner's local Y axis
    Capsule {
        /// Radius of the rounded ends and the cylinder
        radius: f32,
        /// Total height from tip to tip
        height: f32,
    },
}

impl ColliderShape {
    /// Shape category
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Box { .. } => ShapeKind::Box,
            Self::Aabb { .. } => ShapeKind::Aabb,
            Self::Capsule { .. } => ShapeKind::Capsule,
        }
    }
}

/// Shape attached to a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    shape: ColliderShape,
    offset: Vec3,
    enabled: bool,
}

impl Collider {
    /// Create an enabled collider without offset
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vec3::zeros(),
            enabled: true,
        }
    }

    /// Sphere collider
    pub fn new_sphere(radius: f32) -> Self {
        Self::new(ColliderShape::Sphere { radius })
    }

    /// Oriented box collider from its full size
    pub fn new_box(size: Vec3) -> Self {
        Self::new(ColliderShape::Box {
            half_extents: size * 0.5,
        })
    }

    /// Axis-aligned box collider from its full size
    pub fn new_aabb(size: Vec3) -> Self {
        Self::new(ColliderShape::Aabb {
            half_extents: size * 0.5,
        })
    }

    /// Capsule collider; `height` is measured tip to tip
    pub fn new_capsule(radius: f32, height: f32) -> Self {
        Self::new(ColliderShape::Capsule { radius, height })
    }

    /// Set the local offset from the owner's origin
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Set whether the collider participates in tests
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Collider geometry
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Replace the geometry
    pub fn set_shape(&mut self, shape: ColliderShape) {
        self.shape = shape;
    }

    /// Shape category
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Local offset from the owner's origin
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Set the local offset
    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
    }

    /// Whether the collider participates in tests
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the collider
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// World-space center for an owner placed at `owner`
    pub fn world_center(&self, owner: &Pose) -> Vec3 {
        owner.transform_point(&self.offset)
    }

    /// Project the collider into world space
    pub fn to_world_space(&self, owner: &Pose) -> WorldShape {
        let center = self.world_center(owner);

        match self.shape {
            ColliderShape::Sphere { radius } => WorldShape::Sphere(BoundingSphere::new(center, radius)),
            ColliderShape::Box { half_extents } => {
                WorldShape::Box(OrientedBox::new(center, owner.basis, half_extents))
            }
            ColliderShape::Aabb { half_extents } => WorldShape::Aabb(Aabb::new(center, half_extents)),
            ColliderShape::Capsule { radius, height } => {
                let half_segment = (height * 0.5 - radius).max(0.0);
                let up = owner.axis(1) * half_segment;
                WorldShape::Capsule(Capsule::new(center - up, center + up, radius))
            }
        }
    }

    /// Boolean test against another collider
    ///
    /// Returns false immediately when either collider is disabled.
    pub fn check_collision(&self, owner: &Pose, other: &Collider, other_owner: &Pose) -> bool {
        if !self.enabled || !other.enabled {
            return false;
        }
        detection::intersects(&self.to_world_space(owner), &other.to_world_space(other_owner))
    }

    /// Penetration test against another collider
    ///
    /// The returned vector, added to this collider's owner position,
    /// separates the two shapes.
    pub fn check_rigidbody_collision(
        &self,
        owner: &Pose,
        other: &Collider,
        other_owner: &Pose,
    ) -> Option<Vec3> {
        if !self.enabled || !other.enabled {
            return None;
        }
        detection::penetration(&self.to_world_space(owner), &other.to_world_space(other_owner))
    }

    /// Debug visualization of the collider in world space
    pub fn debug_draw_info(&self, owner: &Pose, color: Vec4) -> DebugShape {
        match self.to_world_space(owner) {
            WorldShape::Sphere(sphere) => DebugShape::Sphere {
                center: sphere.center,
                radius: sphere.radius,
                color,
                duration: 0.0,
                wireframe: true,
            },
            WorldShape::Box(bx) => DebugShape::Box {
                center: bx.center,
                extents: bx.half_extents,
                rotation: owner.rotation_quat(),
                color,
                duration: 0.0,
                wireframe: true,
            },
            WorldShape::Aabb(aabb) => DebugShape::Box {
                center: aabb.center,
                extents: aabb.half_extents,
                rotation: crate::foundation::math::Quat::identity(),
                color,
                duration: 0.0,
                wireframe: true,
            },
            WorldShape::Capsule(capsule) => DebugShape::Capsule {
                start: capsule.start,
                end: capsule.end,
                radius: capsule.radius,
                color,
                duration: 0.0,
            },
        }
    }
}
