//! Configuration file discovery and loading.
//!
//! Lookup order, first hit wins:
//! 1. `--config <path>` (or `UPGRADE_ALL_CONFIG`), which must exist
//! 2. `~/.config/upgrade-all/config.yml`, used only if present
//! 3. Built-in defaults

use crate::config::schema::UpgradeConfig;
use crate::error::{Result, UpgradeError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the per-user config file.
pub fn default_config_path() -> Option<PathBuf> {
    Some(
        dirs::home_dir()?
            .join(".config")
            .join("upgrade-all")
            .join("config.yml"),
    )
}

/// Load configuration, honoring an explicitly requested path.
pub fn load_config(explicit: Option<&Path>) -> Result<UpgradeConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(UpgradeError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return load_from_path(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_from_path(&path),
        _ => {
            debug!("No config file found, using defaults");
            Ok(UpgradeConfig::default())
        }
    }
}

/// Load and parse a single config file.
pub fn load_from_path(path: &Path) -> Result<UpgradeConfig> {
    debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Ok(UpgradeConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| UpgradeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
