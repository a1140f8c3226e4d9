//! Error types
//!
//! Only failures that stop a whole operation live here. Per-world and
//! per-record problems met during a scan are `ScanFailure` values, see
//! [`crate::types::ScanFailure`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by index operations and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The worlds directory itself could not be listed. Fatal to a build.
    #[error("Failed to list worlds directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Triple(#[from] TripleError),

    /// A locator could not be re-opened or did not point at an actor record.
    #[error("Locator error: {0}")]
    Locator(String),

    /// A scan task panicked or was cancelled by the runtime.
    #[error("Scan task failed: {0}")]
    Join(String),
}

/// Errors produced by the flat `name|world|locator` transport form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripleError {
    #[error("Malformed triple: {0}")]
    Malformed(String),

    #[error("Field '{field}' contains the separator or a line break")]
    ContainsSeparator { field: &'static str },

    /// The locator's text form would decode as a different locator.
    #[error("Locator '{0}' does not survive a round trip")]
    AmbiguousLocator(String),
}
