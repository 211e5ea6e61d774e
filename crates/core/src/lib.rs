//! barfeed-core: Module capability contract and registry.
//!
//! This crate contains the `Module` trait every data source implements,
//! the `Registry` mapping module names to factories, and the builtin
//! error-text module that replaces blocks which fail to initialize.

mod error;
mod fallback;
mod logger;
mod module;
mod registry;

pub use error::ModuleError;
pub use fallback::{ErrorText, ERROR_LABEL, ERROR_MODULE_NAME};
pub use logger::ModuleLogger;
pub use module::{parse_config, BoxedModule, Module, ModuleConfig};
pub use registry::{ModuleFactory, Registry};

// Re-export types used in trait signatures for convenience
pub use barfeed_types::{Align, BlockInfo, ClickMessage, Markup, MouseButton, ALERT_COLOR};
