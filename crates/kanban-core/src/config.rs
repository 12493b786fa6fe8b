use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BANNER_TTL_SECS: u64 = 4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the board's key-value files.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Overrides the key the board is stored under.
    #[serde(default)]
    pub storage_key: Option<String>,
    #[serde(default)]
    pub banner_ttl_secs: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads a config file, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("kanban")))
            .unwrap_or_else(|| PathBuf::from(".kanban"))
    }

    pub fn effective_storage_key<'a>(&'a self, default_key: &'a str) -> &'a str {
        self.storage_key.as_deref().unwrap_or(default_key)
    }

    pub fn banner_ttl(&self) -> Duration {
        Duration::from_secs(self.banner_ttl_secs.unwrap_or(DEFAULT_BANNER_TTL_SECS))
    }
}
