use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_ENV, CONFIG_SUBDIRS, GLOBAL_CONFIG_FILE, SPATIAL_FILE};

pub trait ConfigDirectory {
    /// Directory holding the Varonia config files, if one can be resolved.
    fn root(&self) -> Option<PathBuf>;

    fn spatial_path(&self) -> Option<PathBuf> {
        self.root().map(|dir| dir.join(SPATIAL_FILE))
    }

    /// Location of the player preferences file. Its content is owned by
    /// another component.
    fn global_config_path(&self) -> Option<PathBuf> {
        self.root().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
    }
}

/// `$VARONIA_CONFIG_DIR`, else `<home>/AppData/LocalLow/Varonia`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalLowDirectory;

impl ConfigDirectory for LocalLowDirectory {
    fn root(&self) -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        let home = dirs::home_dir()?;
        Some(local_low_under(&home))
    }
}

#[derive(Clone, Debug)]
pub struct FixedDirectory(pub PathBuf);

impl FixedDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }
}

impl ConfigDirectory for FixedDirectory {
    fn root(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

pub fn local_low_under(home: &Path) -> PathBuf {
    CONFIG_SUBDIRS
        .iter()
        .fold(home.to_path_buf(), |dir, part| dir.join(part))
}
