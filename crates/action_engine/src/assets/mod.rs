//! Model resources shared between scene objects
//!
//! Scene objects only hold an `Arc<Model>`; the cache keeps the other
//! reference so a model outlives any single object using it.

pub mod model_cache;

pub use model_cache::{FileModelLoader, ModelCache};

use std::sync::Arc;

use thiserror::Error;

/// Opaque model handle
///
/// Mesh data lives in the renderer; the core only needs to know which model
/// an object draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    path: String,
}

impl Model {
    /// Create a model handle for a resource path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Resource path the model was loaded from
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Source of shared model handles
pub trait ModelLoader {
    /// Load (or fetch) the model stored at `path`
    fn load_model(&mut self, path: &str) -> Result<Arc<Model>, AssetError>;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
