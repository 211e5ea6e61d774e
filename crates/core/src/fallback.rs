//! Builtin module shown in place of a block that failed to start.

use crate::{Module, ModuleConfig, ModuleError, ModuleLogger};
use barfeed_types::{BlockInfo, ALERT_COLOR};

/// Name reported by error-text blocks
pub const ERROR_MODULE_NAME: &str = "ErrorText";

/// Label prefixed to the error message when rendered
pub const ERROR_LABEL: &str = "ERR:";

/// Static module displaying a construction error
///
/// It keeps whatever info the block was seeded with, so the message set
/// at construction stays on screen.
#[derive(Debug, Default)]
pub struct ErrorText;

impl ErrorText {
    /// The block shown for `error` at the given instance
    pub fn info_for(error: &ModuleError, instance: &str) -> BlockInfo {
        BlockInfo {
            color: Some(ALERT_COLOR.to_string()),
            name: ERROR_MODULE_NAME.to_string(),
            instance: instance.to_string(),
            ..BlockInfo::text(error.to_string())
        }
    }
}

impl Module for ErrorText {
    fn init(&mut self, _config: &ModuleConfig, _logger: ModuleLogger) -> Result<(), ModuleError> {
        Ok(())
    }

    fn update_info(&mut self, info: BlockInfo) -> BlockInfo {
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_info() {
        let info = ErrorText::info_for(&ModuleError::NotFound("Volume".to_string()), "id_4");
        assert_eq!(info.full_text, "module not found: `Volume`");
        assert_eq!(info.color.as_deref(), Some(ALERT_COLOR));
        assert_eq!(info.name, ERROR_MODULE_NAME);
        assert_eq!(info.instance, "id_4");
    }

    #[test]
    fn test_keeps_seeded_info() {
        let mut module = ErrorText;
        let seeded = BlockInfo::text("boom");
        assert_eq!(module.update_info(seeded.clone()), seeded);
    }
}
