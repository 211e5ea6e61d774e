//! Date/time module
//!
//! Formats the current time with strftime patterns, optionally in a fixed
//! IANA time zone instead of the local one.

use crate::command::spawn_detached;
use barfeed_core::{
    parse_config, BlockInfo, ClickMessage, Module, ModuleConfig, ModuleError, ModuleLogger,
    MouseButton,
};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Configuration for the date/time module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DateTimeConfig {
    /// strftime pattern for `full_text`
    pub format: String,
    /// strftime pattern for `short_text`
    pub short_format: String,
    /// IANA zone name, e.g. "Europe/Budapest"; local time when unset
    pub location: Option<String>,
    /// Command started on left click, e.g. a calendar popup
    pub click_command: Option<String>,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            format: "%Y-%m-%d %H:%M:%S".to_string(),
            short_format: "%d %H:%M:%S".to_string(),
            location: None,
            click_command: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DateTime {
    config: DateTimeConfig,
    zone: Option<Tz>,
    logger: Option<ModuleLogger>,
}

impl DateTime {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_at<Z>(&self, now: chrono::DateTime<Z>, mut info: BlockInfo) -> BlockInfo
    where
        Z: TimeZone,
        Z::Offset: Display,
    {
        info.full_text = now.format(&self.config.format).to_string();
        info.short_text = Some(now.format(&self.config.short_format).to_string());
        info
    }
}

fn check_pattern(key: &'static str, pattern: &str) -> Result<(), ModuleError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ModuleError::InvalidValue {
            key,
            reason: format!("bad strftime pattern `{}`", pattern),
        });
    }
    Ok(())
}

impl Module for DateTime {
    fn init(&mut self, config: &ModuleConfig, logger: ModuleLogger) -> Result<(), ModuleError> {
        self.config = parse_config(config)?;
        check_pattern("format", &self.config.format)?;
        check_pattern("short_format", &self.config.short_format)?;

        self.zone = match self.config.location.as_deref() {
            Some(name) if !name.is_empty() => {
                let zone = name.parse::<Tz>().map_err(|_| ModuleError::InvalidValue {
                    key: "location",
                    reason: format!("unknown time zone `{}`", name),
                })?;
                Some(zone)
            }
            _ => None,
        };
        self.logger = Some(logger);
        Ok(())
    }

    fn update_info(&mut self, info: BlockInfo) -> BlockInfo {
        match self.zone {
            Some(zone) => self.render_at(Utc::now().with_timezone(&zone), info),
            None => self.render_at(Local::now(), info),
        }
    }

    fn handle_click(
        &mut self,
        click: &ClickMessage,
        _info: BlockInfo,
    ) -> Result<Option<BlockInfo>, ModuleError> {
        if click.mouse_button() != MouseButton::Left {
            return Ok(None);
        }
        if let Some(cmd) = self.config.click_command.as_deref() {
            if let Some(logger) = &self.logger {
                logger.debug(&format!("starting `{}`", cmd));
            }
            spawn_detached(cmd)?;
        }
        Ok(None)
    }
}
