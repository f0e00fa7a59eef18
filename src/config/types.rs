use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub deep_link: DeepLinkConfig,
    pub storage: StorageConfig,
    /// Feature flag overrides keyed by flag name.
    pub features: HashMap<String, bool>,
}

/// Scheme and host used when rendering deep links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepLinkConfig {
    pub scheme: String,
    pub host: String,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            scheme: "example".to_string(),
            host: "app".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted preferences.
    /// Defaults to the platform data dir (e.g. `~/.local/share/appnav`).
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("appnav"),
        }
    }
}
