//! Configuration management

mod error;
mod settings;
mod store;
mod watcher;

pub use error::ConfigError;
pub use settings::{BlockConfig, Config};
pub use store::{ConfigStore, RELOAD_DEBOUNCE};
pub use watcher::ConfigWatcher;
