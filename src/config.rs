//! Configuration
//!
//! Sections are deserialized with serde defaults, so an empty or missing
//! config file yields a usable [`IndexerConfig`]. Loading and source
//! precedence live in [`loader`].

pub mod loader;

pub use loader::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::paths::{DataPaths, DEFAULT_WORLDS_DIR};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexerConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_worlds_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WORLDS_DIR)
}

/// Location of the tabletop application's data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Absolute path to the application's data root
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Worlds directory relative to `root`
    #[serde(default = "default_worlds_dir")]
    pub worlds_dir: PathBuf,
}

impl DataConfig {
    pub fn data_paths(&self) -> Result<DataPaths, ApiError> {
        let root = self.root.clone().ok_or_else(missing_root_error)?;
        Ok(DataPaths::with_worlds_dir(root, self.worlds_dir.clone()))
    }
}

pub(crate) fn missing_root_error() -> ApiError {
    ApiError::ConfigError(
        "data.root is not set (use --root, a config file, or VTT_INDEX__DATA__ROOT)".to_string(),
    )
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: None,
            worlds_dir: default_worlds_dir(),
        }
    }
}

/// Scan behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Scan worlds on the blocking pool instead of one after another
    #[serde(default)]
    pub concurrent: bool,

    /// Follow symlinks inside per-record actor directories
    #[serde(default)]
    pub follow_symlinks: bool,
}
