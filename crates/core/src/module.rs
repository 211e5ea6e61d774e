//! Module trait and related types

use crate::{ModuleError, ModuleLogger};
use barfeed_types::{BlockInfo, ClickMessage};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw, module-specific configuration payload of a block
pub type ModuleConfig = Value;

/// Trait for all modules
///
/// A module is the data source behind one block. The block owns it
/// exclusively; the block's scheduler and the bar's click loop call into it,
/// but never at the same time.
pub trait Module: Send {
    /// Parse configuration and acquire resources
    ///
    /// Called exactly once per block, before any scheduling begins. An error
    /// here replaces the block with an error-text block.
    fn init(&mut self, config: &ModuleConfig, logger: ModuleLogger) -> Result<(), ModuleError>;

    /// Produce the block to display
    ///
    /// Called repeatedly on the block's own interval. Must not block
    /// indefinitely; slow work belongs in a background thread that caches
    /// its result for this call to read.
    fn update_info(&mut self, info: BlockInfo) -> BlockInfo;

    /// React to a click on this block
    ///
    /// Returning `Some` publishes the new block and renders it right away.
    /// `None` means nothing visible changed.
    fn handle_click(
        &mut self,
        _click: &ClickMessage,
        _info: BlockInfo,
    ) -> Result<Option<BlockInfo>, ModuleError> {
        Ok(None)
    }
}

/// Type-erased module for dynamic dispatch
pub type BoxedModule = Box<dyn Module>;

/// Decode a module configuration, treating an absent payload as defaults
pub fn parse_config<T>(config: &ModuleConfig) -> Result<T, ModuleError>
where
    T: DeserializeOwned + Default,
{
    if config.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(config.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        exec: String,
        retries: u32,
    }

    #[test]
    fn test_null_config_yields_defaults() {
        let parsed: Sample = parse_config(&Value::Null).unwrap();
        assert_eq!(parsed, Sample::default());
    }

    #[test]
    fn test_partial_config() {
        let parsed: Sample = parse_config(&json!({"exec": "date"})).unwrap();
        assert_eq!(parsed.exec, "date");
        assert_eq!(parsed.retries, 0);
    }

    #[test]
    fn test_wrong_shape_is_invalid_config() {
        let err = parse_config::<Sample>(&json!({"retries": "many"})).unwrap_err();
        assert!(matches!(err, ModuleError::InvalidConfig(_)));
    }
}
