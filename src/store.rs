use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use varonia_core::{Boundary, DecodeWarning, LoadError, SpatialConfig};

use crate::paths::ConfigDirectory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loaded,
}

#[derive(Default)]
struct Current {
    config: Option<Arc<SpatialConfig>>,
    warnings: Vec<DecodeWarning>,
}

/// Current spatial snapshot. Loads are serialised; a failed load leaves the
/// previous snapshot and status untouched.
#[derive(Default)]
pub struct SpatialStore {
    current: RwLock<Current>,
    load_lock: Mutex<()>,
}

impl SpatialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` and, on success, replace the stored snapshot.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<Arc<SpatialConfig>, LoadError> {
        let _guard = self.load_lock.lock().unwrap_or_else(|e| e.into_inner());
        let decoded = varonia_core::load(path)?;
        let config = Arc::new(decoded.config);

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        current.config = Some(Arc::clone(&config));
        current.warnings = decoded.warnings;
        Ok(config)
    }

    /// Resolve the spatial file through `dirs` and reload it.
    pub fn reload_from(
        &self,
        dirs: &impl ConfigDirectory,
    ) -> Result<Arc<SpatialConfig>, LoadError> {
        match dirs.spatial_path() {
            Some(path) => self.reload(path),
            None => {
                log::warn!("no config directory available, spatial config not loaded");
                Err(LoadError::NotFound {
                    path: crate::constants::SPATIAL_FILE.into(),
                })
            }
        }
    }

    pub fn snapshot(&self) -> Option<Arc<SpatialConfig>> {
        self.read().config.clone()
    }

    pub fn status(&self) -> LoadStatus {
        if self.read().config.is_some() {
            LoadStatus::Loaded
        } else {
            LoadStatus::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status() == LoadStatus::Loaded
    }

    /// Warnings from the load that produced the current snapshot.
    pub fn warnings(&self) -> Vec<DecodeWarning> {
        self.read().warnings.clone()
    }

    pub fn main_boundary(&self) -> Option<Boundary> {
        self.snapshot()?.main_boundary().cloned()
    }

    pub fn sub_boundaries(&self) -> Vec<Boundary> {
        self.snapshot()
            .map(|config| config.sub_boundaries())
            .unwrap_or_default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Current> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}
