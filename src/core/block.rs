//! Block - one module bound to its label, interval and identity

use super::bar::BlockUpdate;
use crate::config::BlockConfig;
use barfeed_core::{
    BlockInfo, BoxedModule, ClickMessage, ErrorText, ModuleConfig, ModuleError, ModuleLogger,
    Registry, ERROR_LABEL,
};
use log::{debug, trace, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// A scheduled, renderable segment of the status line
///
/// Construction never fails: a block whose module is unknown or fails to
/// initialize shows the error instead.
pub struct Block {
    /// Module name as declared in the configuration
    pub module_name: String,
    /// Prefix rendered in front of the block text
    pub label: String,
    /// Refresh interval in seconds; 0 runs the module once
    pub interval: u64,
    /// Info as constructed, seeds the bar's slot for this block
    pub info: BlockInfo,
    /// Raw module configuration
    pub config: ModuleConfig,
    /// Construction error shown in place of the module, if any
    error: Option<String>,
    /// Serializes the scheduler and the click loop; only locked on the
    /// blocking pool
    module: Arc<Mutex<BoxedModule>>,
}

impl Block {
    /// Build the block at position `index` of the bar
    pub fn new(index: usize, decl: BlockConfig, registry: &Registry) -> Self {
        let BlockConfig {
            module: module_name,
            label,
            interval,
            mut info,
            config,
        } = decl;

        info.instance = format!("id_{}", index);
        if info.name.is_empty() {
            info.name = module_name.clone();
        }

        let logger = ModuleLogger::new(&module_name, &info.instance);
        let created = registry.create(&module_name).and_then(|mut module| {
            module.init(&config, logger.clone())?;
            Ok(module)
        });

        match created {
            Ok(module) => {
                debug!("Created block {} ({})", info.instance, module_name);
                Self {
                    module_name,
                    label,
                    interval,
                    info,
                    config,
                    error: None,
                    module: Arc::new(Mutex::new(module)),
                }
            }
            Err(e) => {
                warn!(
                    "Block {} ({}) failed to start: {}",
                    info.instance, module_name, e
                );
                Self::failed(module_name, &info.instance, e, logger)
            }
        }
    }

    fn failed(
        module_name: String,
        instance: &str,
        error: ModuleError,
        logger: ModuleLogger,
    ) -> Self {
        let info = ErrorText::info_for(&error, instance);
        let mut module: BoxedModule = Box::new(ErrorText);
        if let Err(e) = module.init(&ModuleConfig::Null, logger) {
            warn!("Error text module failed to start for {}: {}", instance, e);
        }
        Self {
            module_name,
            label: ERROR_LABEL.to_string(),
            interval: 0,
            info,
            config: ModuleConfig::Null,
            error: Some(error.to_string()),
            module: Arc::new(Mutex::new(module)),
        }
    }

    /// The construction error, when this block shows one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refresh period, `None` for blocks that update only once
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.interval > 0).then(|| Duration::from_secs(self.interval))
    }

    /// Give `info` this block's name and instance, whatever the module set
    pub fn stamp(&self, mut info: BlockInfo) -> BlockInfo {
        info.name.clone_from(&self.info.name);
        info.instance.clone_from(&self.info.instance);
        info
    }

    /// Run `f` on the module from the blocking pool
    ///
    /// Modules may shell out or do other blocking I/O, which must not stall
    /// the runtime's workers.
    async fn with_module<T, F>(&self, f: F) -> Result<T, ModuleError>
    where
        F: FnOnce(&mut BoxedModule) -> T + Send + 'static,
        T: Send + 'static,
    {
        let module = Arc::clone(&self.module);
        tokio::task::spawn_blocking(move || {
            let mut module = module
                .lock()
                .map_err(|_| ModuleError::Unavailable("module lock poisoned".to_string()))?;
            Ok(f(&mut *module))
        })
        .await
        .map_err(|e| ModuleError::Unavailable(format!("module task failed: {}", e)))?
    }

    /// Run the module's click handler against the block's current info
    pub async fn click(
        &self,
        click: &ClickMessage,
        current: BlockInfo,
    ) -> Result<Option<BlockInfo>, ModuleError> {
        let click = click.clone();
        self.with_module(move |module| module.handle_click(&click, current))
            .await?
    }

    /// Refresh loop, publishing one update per interval until cancelled
    pub(crate) async fn run(
        &self,
        index: usize,
        slots: watch::Receiver<Vec<BlockInfo>>,
        updates: mpsc::Sender<BlockUpdate>,
        cancel: CancellationToken,
    ) {
        let period = self.refresh_interval();
        let mut first = true;
        loop {
            let current = slots
                .borrow()
                .get(index)
                .cloned()
                .unwrap_or_else(|| self.info.clone());
            let updated = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                updated = self.with_module(move |module| module.update_info(current)) => updated,
            };

            match updated {
                Ok(info) => {
                    // a block's first value is shown without waiting for the next tick
                    let update = BlockUpdate {
                        index,
                        info,
                        render_now: first,
                    };
                    first = false;
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        sent = updates.send(update) => {
                            if sent.is_err() {
                                break;
                            }
                        }
                    }
                }
                Err(e) => warn!("Block {} failed to update: {}", self.info.instance, e),
            }

            let Some(period) = period else {
                break;
            };
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(period) => {}
            }
        }
        trace!("Block {} stopped", self.info.instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barfeed_types::ALERT_COLOR;
    use serde_json::json;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        barfeed_modules::register_all(&mut registry);
        registry
    }

    fn decl(module: &str, label: &str) -> BlockConfig {
        BlockConfig {
            module: module.to_string(),
            label: label.to_string(),
            ..BlockConfig::default()
        }
    }

    #[test]
    fn test_identity_assigned() {
        let block = Block::new(3, decl("StaticText", ""), &registry());
        assert_eq!(block.info.name, "StaticText");
        assert_eq!(block.info.instance, "id_3");
        assert!(block.error().is_none());
    }

    #[test]
    fn test_configured_name_kept() {
        let mut config = decl("StaticText", "");
        config.info.name = "clock".to_string();
        let block = Block::new(0, config, &registry());
        assert_eq!(block.info.name, "clock");
        assert_eq!(block.info.instance, "id_0");
    }

    #[test]
    fn test_unknown_module_falls_back() {
        let block = Block::new(1, decl("Unknown", "B"), &registry());
        assert_eq!(block.label, ERROR_LABEL);
        assert_eq!(block.info.color.as_deref(), Some(ALERT_COLOR));
        assert_eq!(block.info.full_text, "module not found: `Unknown`");
        assert_eq!(block.info.instance, "id_1");
        assert!(block.error().is_some());
        assert!(block.refresh_interval().is_none());
    }

    #[test]
    fn test_failed_init_falls_back() {
        let mut config = decl("ExternalCmd", "");
        config.interval = 5;
        config.config = json!({"click_left": "true"});
        let block = Block::new(0, config, &registry());
        assert_eq!(block.info.full_text, "missing required parameter: `exec`");
        assert_eq!(block.interval, 0);
    }

    #[test]
    fn test_stamp_restores_identity() {
        let mut config = decl("StaticText", "");
        config.info.name = "clock".to_string();
        let block = Block::new(2, config, &registry());

        let info = block.stamp(BlockInfo::text("fresh"));
        assert_eq!(info.full_text, "fresh");
        assert_eq!(info.name, "clock");
        assert_eq!(info.instance, "id_2");
    }

    #[tokio::test]
    async fn test_fallback_block_handles_clicks() {
        let block = Block::new(0, decl("Unknown", ""), &registry());
        let click = ClickMessage {
            name: block.info.name.clone(),
            instance: block.info.instance.clone(),
            button: 1,
            ..ClickMessage::default()
        };
        let result = block.click(&click, block.info.clone()).await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_refresh_interval() {
        let mut config = decl("StaticText", "");
        config.interval = 30;
        let block = Block::new(0, config, &registry());
        assert_eq!(block.refresh_interval(), Some(Duration::from_secs(30)));
    }
}
