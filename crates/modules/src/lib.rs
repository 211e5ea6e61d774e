//! barfeed-modules: Builtin module implementations for barfeed.

mod command;
mod date_time;
mod external_cmd;
mod static_text;

pub use date_time::{DateTime, DateTimeConfig};
pub use external_cmd::{ExternalCmd, ExternalCmdConfig};
pub use static_text::StaticText;

use barfeed_core::Registry;

/// Register all builtin modules with `registry`
pub fn register_all(registry: &mut Registry) {
    registry.register("StaticText", || Box::new(StaticText::new()));
    registry.register("DateTime", || Box::new(DateTime::new()));
    registry.register("ExternalCmd", || Box::new(ExternalCmd::new()));
}
