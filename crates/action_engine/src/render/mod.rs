//! # Rendering interface
//!
//! The scene core does not know about pipelines or shaders. Each frame it
//! walks the active objects and hands their model and world matrix to a
//! [`ModelRenderer`] supplied by the presentation layer.

use crate::assets::Model;
use crate::foundation::math::{Mat4, Vec3};

/// Per-frame camera data passed through to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// World to view matrix
    pub view: Mat4,
    /// View to clip matrix
    pub projection: Mat4,
    /// Camera position in world space
    pub camera_position: Vec3,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::zeros(),
        }
    }
}

impl RenderContext {
    /// Create a context from camera matrices
    pub fn new(view: Mat4, projection: Mat4, camera_position: Vec3) -> Self {
        Self {
            view,
            projection,
            camera_position,
        }
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Draw-submission interface implemented by the rendering backend
pub trait ModelRenderer {
    /// Submit one model instance
    fn draw_model(&mut self, context: &RenderContext, model: &Model, world_matrix: &Mat4);
}
