#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliCommand, CliConfig};
pub use toml_config::{TrackerConfig, DEFAULT_CONFIG_FILE};

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Loads the TOML file (or defaults when the default file is absent),
/// applies command-line overrides and validates the result.
pub fn load_settings(
    config_path: Option<&str>,
    api_base_url: Option<&str>,
    output_path: Option<&str>,
) -> Result<TrackerConfig> {
    let mut config = match config_path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TrackerConfig::from_file(path)?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
            TrackerConfig::from_file(DEFAULT_CONFIG_FILE)?
        }
        None => {
            tracing::debug!("No configuration file, using defaults");
            TrackerConfig::default()
        }
    };

    if let Some(url) = api_base_url {
        config.api.base_url = url.to_string();
    }
    if let Some(path) = output_path {
        config.export.output_path = path.to_string();
    }

    config.validate()?;
    Ok(config)
}
