//! Logging sink handed to modules at init time.

use log::Level;

/// Per-block logger
///
/// Records go through the `log` facade with a target naming the module
/// and its block instance, so `RUST_LOG=barfeed::module=debug` selects
/// module output only.
#[derive(Debug, Clone)]
pub struct ModuleLogger {
    target: String,
}

impl ModuleLogger {
    pub fn new(module: &str, instance: &str) -> Self {
        Self {
            target: format!("barfeed::module::{}#{}", module, instance),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn log(&self, level: Level, message: &str) {
        log::log!(target: &self.target, level, "{}", message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_names_block() {
        let logger = ModuleLogger::new("DateTime", "id_3");
        assert_eq!(logger.target(), "barfeed::module::DateTime#id_3");
    }
}
