pub mod configure;
pub mod expand;
pub mod normalize;
pub mod resources;
pub mod validate;

use colored::Colorize;
use std::path::PathBuf;

/// The given configuration file, or the discovered one
pub fn resolve_config_path(file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = match file {
        Some(path) => path,
        None => cirrus_aws::find_provider_file()?,
    };
    println!(
        "Configuration file: {}",
        path.display().to_string().cyan()
    );
    Ok(path)
}
