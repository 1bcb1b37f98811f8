//! Centralized application directory paths for propa.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! # Directory Layout
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data (history, bookmarks) | `~/Library/Application Support/propa/` | `~/.local/share/propa/` |
//! | Config | `~/Library/Application Support/propa/` | `~/.config/propa/` |
//!
//! # Environment Overrides
//!
//! - `PROPA_DATA_DIR` overrides [`data_dir`]
//! - `PROPA_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the persisted history and bookmark blobs.
///
/// Resolves to `dirs::data_dir()/propa/` by default. Override with
/// the `PROPA_DATA_DIR` environment variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("PROPA_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("propa"))
        .unwrap_or_else(|| std::env::temp_dir().join("propa-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/propa/` by default. Override with
/// the `PROPA_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("PROPA_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("propa"))
        .unwrap_or_else(|| std::env::temp_dir().join("propa-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
