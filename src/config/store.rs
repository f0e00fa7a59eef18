//! Thread-safe configuration storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::AppConfig;

/// Config container shared between the CLI driver and its collaborators.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<AppConfig>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: AppConfig, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Load from `path` and wrap the result.
    pub fn open(path: PathBuf) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from(&path)?;
        Ok(Self::new(config, path))
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> AppConfig {
        self.inner.read().clone()
    }

    /// Reload config from the file.
    ///
    /// On failure, keeps the old config and returns the error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = AppConfig::load_from(&self.path)?;
        *self.inner.write() = config;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
