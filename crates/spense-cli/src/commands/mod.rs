//! CLI subcommands.

pub mod config;
pub mod inbox;
pub mod list;
pub mod parse;
pub mod save;

use spense_core::SpenseConfig;

/// Load configuration from an explicit path, the default location, or
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SpenseConfig> {
    if let Some(path) = config_path {
        return Ok(SpenseConfig::from_file(std::path::Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(SpenseConfig::from_file(&default_path)?);
    }

    Ok(SpenseConfig::default())
}
