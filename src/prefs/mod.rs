//! Persisted key-value preferences.
//!
//! Only repositories write preferences. A [`PreferenceStore`] is synchronous;
//! async callers move file access onto a blocking thread.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FilePreferences;
pub use memory::InMemoryPreferences;

/// Errors that can occur when reading or writing preferences.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Failed to access preferences file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preferences file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Preferences task failed: {0}")]
    Task(String),
}

pub trait PreferenceStore: Send + Sync {
    /// Stored value, or `None` when the key was never written.
    fn get_bool(&self, key: &str) -> Result<Option<bool>, PrefsError>;

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PrefsError>;

    fn remove(&self, key: &str) -> Result<(), PrefsError>;
}
