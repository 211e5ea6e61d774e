//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or watching the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("I/O error reading {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    /// The file is not a valid configuration document
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but describes an unusable bar
    #[error("invalid config: {0}")]
    Invalid(String),

    /// No per-user configuration directory could be determined
    #[error("could not determine config directory")]
    NoConfigDir,

    /// Failed to set up file watching
    #[error("failed to watch config file: {0}")]
    Watch(#[from] notify::Error),
}
