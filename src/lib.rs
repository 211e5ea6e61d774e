//! barfeed: a status line feeder for i3bar and swaybar
//!
//! This library provides the engine behind the `barfeed` binary:
//! - Blocks binding one module to display metadata and a refresh interval
//! - The Bar, which aggregates block updates, renders status lines and
//!   dispatches click events
//! - Configuration loading and hot reload
//!
//! The module contract and registry live in `barfeed-core`; the builtin
//! modules in `barfeed-modules`.

pub mod config;
pub mod core;

// Re-export commonly used types
pub use self::config::{BlockConfig, Config, ConfigError, ConfigStore};
pub use self::core::{Bar, Block, Output, RunningBar};
