//! Debug drawing primitives
//!
//! The world hands collider outlines to a [`ShapeRenderer`]; how they end
//! up on screen is the renderer's business. [`DebugDrawSystem`] is the
//! in-engine collector used by headless runs and tests.

use crate::foundation::math::{Quat, Vec3, Vec4};

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Segment start
        start: Vec3,
        /// Segment end
        end: Vec3,
        /// RGBA color
        color: Vec4,
        /// Seconds to keep the shape; 0 for a single frame
        duration: f32,
    },

    /// Sphere at center with radius
    Sphere {
        /// Sphere center
        center: Vec3,
        /// Sphere radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds to keep the shape; 0 for a single frame
        duration: f32,
        /// Outline only
        wireframe: bool,
    },

    /// Box (AABB or OBB) at center with half-extents
    Box {
        /// Box center
        center: Vec3,
        /// Half size along the box axes
        extents: Vec3,
        /// Orientation; identity for axis-aligned boxes
        rotation: Quat,
        /// RGBA color
        color: Vec4,
        /// Seconds to keep the shape; 0 for a single frame
        duration: f32,
        /// Outline only
        wireframe: bool,
    },

    /// Capsule from start to end with radius
    Capsule {
        /// Core segment start
        start: Vec3,
        /// Core segment end
        end: Vec3,
        /// Capsule radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds to keep the shape; 0 for a single frame
        duration: f32,
    },
}

impl DebugShape {
    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            Self::Line { duration, .. }
            | Self::Sphere { duration, .. }
            | Self::Box { duration, .. }
            | Self::Capsule { duration, .. } => *duration,
        }
    }

    /// Color of the shape
    pub fn color(&self) -> Vec4 {
        match self {
            Self::Line { color, .. }
            | Self::Sphere { color, .. }
            | Self::Box { color, .. }
            | Self::Capsule { color, .. } => *color,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        match &mut self {
            Self::Line { duration, .. }
            | Self::Sphere { duration, .. }
            | Self::Box { duration, .. }
            | Self::Capsule { duration, .. } => *duration = new_duration,
        }
        self
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        match self {
            Self::Line { duration, .. }
            | Self::Sphere { duration, .. }
            | Self::Box { duration, .. }
            | Self::Capsule { duration, .. } => {
                *duration -= delta_time;
                *duration <= 0.0
            }
        }
    }
}

/// Consumer of debug shapes (typically a line renderer)
pub trait ShapeRenderer {
    /// Submit one shape for drawing
    fn draw_shape(&mut self, shape: &DebugShape);
}

/// Collects debug shapes and expires them after their duration
///
/// Zero-duration shapes survive until the next [`DebugDrawSystem::update`].
#[derive(Debug)]
pub struct DebugDrawSystem {
    shapes: Vec<DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            enabled: true,
        }
    }

    /// Draw a line segment
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, duration: f32) {
        self.push(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    /// Draw a wireframe sphere
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Vec4, duration: f32) {
        self.push(DebugShape::Sphere {
            center,
            radius,
            color,
            duration,
            wireframe: true,
        });
    }

    fn push(&mut self, shape: DebugShape) {
        if self.enabled {
            self.shapes.push(shape);
        }
    }

    /// Update shape lifetimes and remove expired shapes
    pub fn update(&mut self, delta_time: f32) {
        self.shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// All shapes currently alive
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Forward every shape to another renderer
    pub fn flush_to(&self, renderer: &mut dyn ShapeRenderer) {
        for shape in &self.shapes {
            renderer.draw_shape(shape);
        }
    }

    /// Clear all shapes
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRenderer for DebugDrawSystem {
    fn draw_shape(&mut self, shape: &DebugShape) {
        self.push(shape.clone());
    }
}
