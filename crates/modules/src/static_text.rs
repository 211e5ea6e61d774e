//! Static Text module
//!
//! Shows the text configured in the block's `info` and nothing else.
//! Useful for labels, separators, or icons.

use barfeed_core::{BlockInfo, Module, ModuleConfig, ModuleError, ModuleLogger};

#[derive(Debug, Default)]
pub struct StaticText;

impl StaticText {
    pub fn new() -> Self {
        Self
    }
}

impl Module for StaticText {
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
    use barfeed_core::ClickMessage;
    use serde_json::Value;

    #[test]
    fn test_static_text_is_unchanged() {
        let mut module = StaticText::new();
        module
            .init(&Value::Null, ModuleLogger::new("StaticText", "id_0"))
            .unwrap();

        let info = BlockInfo::text("♪");
        assert_eq!(module.update_info(info.clone()), info);

        let click = ClickMessage {
            button: 1,
            ..ClickMessage::default()
        };
        assert!(module.handle_click(&click, info).unwrap().is_none());
    }
}
