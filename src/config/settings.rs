//! Bar and block configuration

use super::ConfigError;
use crate::core::{Bar, Block};
use barfeed_core::{BlockInfo, ModuleConfig, Registry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bar configuration
///
/// ```json
/// {
///   "defaults": { "color": "#D8DEE9", "separator_block_width": 15 },
///   "blocks": [
///     { "module": "DateTime", "label": "⏲", "interval": 1,
///       "config": { "format": "%H:%M:%S" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Applied to every block for the fields it leaves unset
    #[serde(default)]
    pub defaults: Option<BlockInfo>,
    /// Blocks in render order
    #[serde(default)]
    pub blocks: Vec<BlockConfig>,
}

/// One block declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Registry name of the module
    pub module: String,
    /// Rendered in front of the block text
    #[serde(default)]
    pub label: String,
    /// Refresh interval in seconds; 0 renders once
    #[serde(default)]
    pub interval: u64,
    /// Initial info and styling
    #[serde(default)]
    pub info: BlockInfo,
    /// Module-specific settings
    #[serde(default)]
    pub config: ModuleConfig,
}

impl Config {
    /// Parse and validate a configuration document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_json(&content)
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("org", "barfeed", "barfeed")
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.json"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, block) in self.blocks.iter().enumerate() {
            if block.module.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "block {} has no module name",
                    index
                )));
            }
        }
        Ok(())
    }

    /// Block declarations with `defaults` merged in
    pub fn resolved_blocks(&self) -> Vec<BlockConfig> {
        self.blocks
            .iter()
            .cloned()
            .map(|mut block| {
                if let Some(defaults) = &self.defaults {
                    block.info.merge_defaults(defaults);
                }
                block
            })
            .collect()
    }

    /// Construct a bar, binding every block to a fresh module
    pub fn build_bar(&self, registry: &Registry) -> Bar {
        let blocks = self
            .resolved_blocks()
            .into_iter()
            .enumerate()
            .map(|(index, decl)| Block::new(index, decl, registry))
            .collect();
        Bar::new(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r##"{
        "defaults": {"color": "#D8DEE9", "separator": false, "align": "center"},
        "blocks": [
            {"module": "StaticText", "label": "A"},
            {"module": "DateTime", "interval": 1, "info": {"color": "#88C0D0"},
             "config": {"format": "%H:%M"}}
        ]
    }"##;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_json(SAMPLE).unwrap();
        assert_eq!(config.blocks.len(), 2);
        assert_eq!(config.blocks[0].label, "A");
        assert_eq!(config.blocks[0].interval, 0);
        assert!(config.blocks[0].config.is_null());
        assert_eq!(config.blocks[1].config["format"], "%H:%M");
    }

    #[test]
    fn test_defaults_never_override_block_values() {
        let config = Config::from_json(SAMPLE).unwrap();
        let blocks = config.resolved_blocks();
        assert_eq!(blocks[0].info.color.as_deref(), Some("#D8DEE9"));
        assert_eq!(blocks[1].info.color.as_deref(), Some("#88C0D0"));
        assert_eq!(blocks[1].info.separator, Some(false));
    }

    #[test]
    fn test_missing_defaults() {
        let config = Config::from_json(r#"{"blocks":[{"module":"StaticText"}]}"#).unwrap();
        assert!(config.defaults.is_none());
        assert_eq!(config.resolved_blocks()[0].info, BlockInfo::default());
    }

    #[test]
    fn test_rejects_unknown_align() {
        let result = Config::from_json(r#"{"defaults":{"align":"justify"},"blocks":[]}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_block_without_module() {
        let result = Config::from_json(r#"{"blocks":[{"module":" "}]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Config::from_json(r#"{"blocks":[{"label":"x"}]}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.blocks.len(), 2);

        let missing = Config::load_from_path(Path::new("/nonexistent/barfeed.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_build_bar_keeps_order() {
        let mut registry = Registry::new();
        barfeed_modules::register_all(&mut registry);
        let bar = Config::from_json(SAMPLE).unwrap().build_bar(&registry);
        let names: Vec<&str> = bar.blocks().iter().map(|b| b.info.name.as_str()).collect();
        assert_eq!(names, vec!["StaticText", "DateTime"]);
    }
}
