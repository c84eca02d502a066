//! Model loading and caching

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::{AssetError, Model, ModelLoader};

/// Resolves model paths against a list of search directories
#[derive(Debug, Clone, Default)]
pub struct FileModelLoader {
    search_paths: Vec<PathBuf>,
}

impl FileModelLoader {
    /// Create a loader with no search paths (paths are used as given)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory to search before falling back to the raw path
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
            .or_else(|| {
                let direct = PathBuf::from(path);
                direct.exists().then_some(direct)
            })
    }
}

impl ModelLoader for FileModelLoader {
    fn load_model(&mut self, path: &str) -> Result<Arc<Model>, AssetError> {
        let file_path = self
            .resolve(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;

        let metadata = std::fs::metadata(&file_path)?;
        if !metadata.is_file() {
            return Err(AssetError::LoadFailed(format!("{} is not a file", file_path.display())));
        }

        log::debug!("Loaded model {} from {}", path, file_path.display());
        Ok(Arc::new(Model::new(path)))
    }
}

/// Memoizes another loader by path
pub struct ModelCache<L: ModelLoader> {
    loader: L,
    models: HashMap<String, Arc<Model>>,
}

impl<L: ModelLoader> ModelCache<L> {
    /// Wrap a loader
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            models: HashMap::new(),
        }
    }

    /// Number of cached models
    pub fn cached_count(&self) -> usize {
        self.models.len()
    }

    /// Whether `path` is cached
    pub fn contains(&self, path: &str) -> bool {
        self.models.contains_key(path)
    }

    /// Drop every cached handle; models still used by objects stay alive
    pub fn clear(&mut self) {
        self.models.clear();
    }
}

impl<L: ModelLoader> ModelLoader for ModelCache<L> {
    fn load_model(&mut self, path: &str) -> Result<Arc<Model>, AssetError> {
        if let Some(model) = self.models.get(path) {
            return Ok(Arc::clone(model));
        }

        let model = self.loader.load_model(path)?;
        self.models.insert(path.to_string(), Arc::clone(&model));
        Ok(model)
    }
}
