//! External command module
//!
//! Displays the output of a shell command and runs per-button commands on
//! click. All commands go through `sh -c`.

use crate::command::{shell_output, shell_succeeds};
use barfeed_core::{
    parse_config, BlockInfo, ClickMessage, Module, ModuleConfig, ModuleError, ModuleLogger,
    MouseButton,
};
use serde::{Deserialize, Serialize};

/// Configuration for the external command module
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExternalCmdConfig {
    /// Command whose output is displayed
    pub exec: String,
    /// Guard command; `exec` only runs when this exits successfully
    pub exec_if: Option<String>,
    pub click_left: Option<String>,
    pub click_middle: Option<String>,
    pub click_right: Option<String>,
    pub scroll_up: Option<String>,
    pub scroll_down: Option<String>,
}

impl ExternalCmdConfig {
    fn command_for(&self, button: MouseButton) -> Option<&str> {
        let cmd = match button {
            MouseButton::Left => &self.click_left,
            MouseButton::Middle => &self.click_middle,
            MouseButton::Right => &self.click_right,
            MouseButton::ScrollUp => &self.scroll_up,
            MouseButton::ScrollDown => &self.scroll_down,
            MouseButton::Other(_) => return None,
        };
        cmd.as_deref().filter(|cmd| !cmd.is_empty())
    }
}

#[derive(Debug, Default)]
pub struct ExternalCmd {
    config: ExternalCmdConfig,
    logger: Option<ModuleLogger>,
}

impl ExternalCmd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the block text with the output of `cmd`, or with the error
    fn show_output(&self, cmd: &str, mut info: BlockInfo) -> BlockInfo {
        let text = match shell_output(cmd) {
            Ok(text) => text,
            Err(e) => {
                if let Some(logger) = &self.logger {
                    logger.warn(&e.to_string());
                }
                e.to_string()
            }
        };
        info.short_text = Some(text.clone());
        info.full_text = text;
        info
    }
}

impl Module for ExternalCmd {
    fn init(&mut self, config: &ModuleConfig, logger: ModuleLogger) -> Result<(), ModuleError> {
        self.config = parse_config(config)?;
        if self.config.exec.trim().is_empty() {
            return Err(ModuleError::MissingParameter("exec"));
        }
        self.logger = Some(logger);
        Ok(())
    }

    fn update_info(&mut self, info: BlockInfo) -> BlockInfo {
        if let Some(guard) = self.config.exec_if.as_deref() {
            if !shell_succeeds(guard) {
                return info;
            }
        }
        self.show_output(&self.config.exec, info)
    }

    fn handle_click(
        &mut self,
        click: &ClickMessage,
        info: BlockInfo,
    ) -> Result<Option<BlockInfo>, ModuleError> {
        let Some(cmd) = self.config.command_for(click.mouse_button()) else {
            return Ok(None);
        };
        Ok(Some(self.show_output(cmd, info)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn init_with(config: serde_json::Value) -> Result<ExternalCmd, ModuleError> {
        let mut module = ExternalCmd::new();
        module.init(&config, ModuleLogger::new("ExternalCmd", "id_1"))?;
        Ok(module)
    }

    fn click(button: u32) -> ClickMessage {
        ClickMessage {
            name: "ExternalCmd".to_string(),
            instance: "id_1".to_string(),
            button,
            ..ClickMessage::default()
        }
    }

    #[test]
    fn test_exec_is_required() {
        let err = init_with(json!({})).unwrap_err();
        assert!(matches!(err, ModuleError::MissingParameter("exec")));
    }

    #[test]
    fn test_shows_command_output() {
        let mut module = init_with(json!({"exec": "echo 42%"})).unwrap();
        let info = module.update_info(BlockInfo::default());
        assert_eq!(info.full_text, "42%");
        assert_eq!(info.short_text.as_deref(), Some("42%"));
    }

    #[test]
    fn test_failed_guard_keeps_info() {
        let mut module = init_with(json!({"exec": "echo on", "exec_if": "false"})).unwrap();
        let info = module.update_info(BlockInfo::text("previous"));
        assert_eq!(info.full_text, "previous");
    }

    #[test]
    fn test_failed_command_shows_error() {
        let mut module = init_with(json!({"exec": "exit 1"})).unwrap();
        let info = module.update_info(BlockInfo::default());
        assert!(info.full_text.contains("failed"));
    }

    #[test]
    fn test_click_runs_button_command() {
        let mut module = init_with(json!({
            "exec": "echo idle",
            "scroll_up": "echo louder",
        }))
        .unwrap();

        let updated = module.handle_click(&click(4), BlockInfo::default()).unwrap();
        assert_eq!(updated.unwrap().full_text, "louder");

        let untouched = module.handle_click(&click(5), BlockInfo::default()).unwrap();
        assert!(untouched.is_none());
    }
}
