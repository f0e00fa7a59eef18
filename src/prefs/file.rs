use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::{PreferenceStore, PrefsError};

/// On-disk layout: a single `[flags]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

/// Preferences stored as TOML.
///
/// Every read-modify-write holds an exclusive lock on a sibling `.lock`
/// file, and the new content is written to a temp file and renamed over the
/// original, so readers never observe a partial write.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `prefs.toml` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("prefs.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn lock(&self) -> Result<File, PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.path.with_extension("lock"))
            .map_err(|e| self.io_error(e))?;
        lock_file.lock_exclusive().map_err(|e| self.io_error(e))?;
        Ok(lock_file)
    }

    fn read(&self) -> Result<PrefsFile, PrefsError> {
        if !self.path.exists() {
            return Ok(PrefsFile::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        toml::from_str(&content).map_err(|e| PrefsError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write(&self, prefs: &PrefsFile) -> Result<(), PrefsError> {
        let content = toml::to_string(prefs)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, bool>)) -> Result<(), PrefsError> {
        let lock = self.lock()?;
        let mut prefs = self.read()?;
        apply(&mut prefs.flags);
        let result = self.write(&prefs);
        // Unlock errors are irrelevant; closing the file releases the lock too.
        let _ = FileExt::unlock(&lock);
        result
    }
}

impl PreferenceStore for FilePreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, PrefsError> {
        Ok(self.read()?.flags.get(key).copied())
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PrefsError> {
        tracing::debug!(path = %self.path.display(), key, value, "writing preference");
        self.update(|flags| {
            flags.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        tracing::debug!(path = %self.path.display(), key, "removing preference");
        self.update(|flags| {
            flags.remove(key);
        })
    }
}
