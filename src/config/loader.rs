//! Config loading: defaults, then global file, then explicit file, then environment.

use super::IndexerConfig;
use crate::error::ApiError;
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment prefix; nested keys use `__`, e.g. `VTT_INDEX__DATA__ROOT`.
pub const ENV_PREFIX: &str = "VTT_INDEX";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/vtt-index/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join("vtt-index").join("config.toml"))
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence: serde defaults (lowest) -> global file (optional) ->
    /// `explicit` file (required when given) -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<IndexerConfig, ApiError> {
        let mut builder = Config::builder();
        if let Some(global) = global_config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApiError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
