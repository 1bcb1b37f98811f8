//! Portal configuration.
//!
//! Loaded from `config.toml` under the config directory; every field has a
//! default so a missing or partial file still yields a usable configuration.
//!
//! ```toml
//! [search]
//! mode = "hybrid"          # or "offline"
//! base_url = "https://www.dati.gov.it"
//! rows = 20
//! timeout_seconds = 10
//! cache_ttl_seconds = 300
//! date_policy = "exclude"  # or "keep"
//!
//! [storage]
//! history_cap = 50
//! ```

use std::path::{Path, PathBuf};

use propa_search::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Query engine and dati.gov.it adapter settings.
    pub search: SearchConfig,
    /// Local persistence settings.
    pub storage: StorageConfig,
}

/// Local persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Maximum number of history entries retained, most recent first.
    pub history_cap: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_cap: DEFAULT_HISTORY_CAP,
        }
    }
}

impl PortalConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PortalError::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PortalError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path (`config_dir()/config.toml`).
    pub fn default_config_path() -> PathBuf {
        crate::propa_dirs::config_file()
    }

    /// Validates the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Search`] for invalid search settings and
    /// [`PortalError::Config`] if `history_cap` is zero.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.storage.history_cap == 0 {
            return Err(PortalError::Config(
                "history_cap must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
