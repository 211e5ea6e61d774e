//! Errors raised by modules and the registry.

use thiserror::Error;

/// Errors a module can report from `init` or `handle_click`
#[derive(Debug, Error)]
pub enum ModuleError {
    /// No factory is registered under the requested name
    #[error("module not found: `{0}`")]
    NotFound(String),

    /// The module configuration could not be decoded
    #[error("invalid module config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A required configuration key is absent or empty
    #[error("missing required parameter: `{0}`")]
    MissingParameter(&'static str),

    /// A configured value is well-formed but unusable
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    /// An external dependency (command, device, service) failed
    #[error("{0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
