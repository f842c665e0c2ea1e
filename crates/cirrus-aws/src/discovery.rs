//! Provider configuration file discovery

use crate::error::{ConfigError, Result};
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "CIRRUS_CONFIG_PATH";

/// File names looked up in the working directory, in priority order
pub const CANDIDATES: [&str; 3] = ["cirrus.local.yaml", "cirrus.yaml", "cirrus.json"];

/// Find the provider configuration file
///
/// Search order:
/// 1. `CIRRUS_CONFIG_PATH` (direct path)
/// 2. Working directory: `cirrus.local.yaml`, `cirrus.yaml`, `cirrus.json`
/// 3. `<config dir>/cirrus/cirrus.yaml` (e.g. `~/.config/cirrus/cirrus.yaml`)
pub fn find_provider_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::debug!("{} points at a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("cirrus").join("cirrus.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ProviderFileNotFound)
}
