//! Configuration management

use crate::catalog::SlideCatalog;
use crate::paths;
use crate::store::{DEFAULT_FLAG_KEY, JsonFileStore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Key the completion flag is stored under
    #[serde(default = "default_flag_key")]
    pub flag_key: String,

    /// Preferences file holding the completion flag
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// JSON catalog to use instead of the built-in slides
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_flag_key() -> String {
    DEFAULT_FLAG_KEY.to_string()
}

fn default_store_path() -> PathBuf {
    paths::data_dir().join("preferences.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flag_key: default_flag_key(),
            store_path: default_store_path(),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::config_dir().join("config.json")
    }

    /// The slide catalog: `catalog_path` if set, otherwise the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog cannot be loaded
    pub fn catalog(&self) -> Result<SlideCatalog> {
        match &self.catalog_path {
            Some(path) => SlideCatalog::load_from(path),
            None => Ok(SlideCatalog::builtin()),
        }
    }

    /// Flag store at `store_path`
    #[must_use]
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_path)
    }
}
