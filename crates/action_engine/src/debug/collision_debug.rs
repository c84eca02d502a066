//! Collision-specific debug colors

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec4;

/// Color scheme for collider visualization
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionDebugColors {
    /// Color for collision shapes (not colliding)
    pub shape_default: Vec4,

    /// Color for collision shapes (currently colliding)
    pub shape_colliding: Vec4,

    /// Color for disabled colliders
    pub shape_disabled: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Vec4::new(0.0, 1.0, 0.0, 0.3),   // Green, semi-transparent
            shape_colliding: Vec4::new(1.0, 0.0, 0.0, 0.5), // Red, semi-transparent
            shape_disabled: Vec4::new(0.5, 0.5, 0.5, 0.2),  // Grey, transparent
        }
    }
}

impl CollisionDebugColors {
    /// Pick the color for a collider
    pub fn color_for(&self, enabled: bool, colliding: bool) -> Vec4 {
        match (enabled, colliding) {
            (false, _) => self.shape_disabled,
            (true, true) => self.shape_colliding,
            (true, false) => self.shape_default,
        }
    }
}
