//! Config store - owns the latest good config and swaps bars on change

use super::{Config, ConfigError};
use crate::core::{Bar, ClickLines, Output};
use anyhow::{Context, Result};
use arc_swap::{ArcSwap, ArcSwapOption};
use barfeed_core::Registry;
use barfeed_types::Header;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Quiet period after a change event before the file is re-read
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(250);

pub struct ConfigStore {
    path: PathBuf,
    registry: Arc<Registry>,
    config: ArcSwap<Config>,
    last_error: ArcSwapOption<String>,
}

impl ConfigStore {
    /// Load the initial config; failing here is fatal for the caller
    pub fn open(path: impl Into<PathBuf>, registry: Arc<Registry>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = Config::load_from_path(&path)?;
        info!(
            "Loaded config from {} ({} blocks)",
            path.display(),
            config.blocks.len()
        );
        Ok(Self {
            path,
            registry,
            config: ArcSwap::from_pointee(config),
            last_error: ArcSwapOption::empty(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The most recent config that parsed and validated
    pub fn config(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// The error of the last failed reload, cleared by a successful one
    pub fn last_error(&self) -> Option<Arc<String>> {
        self.last_error.load_full()
    }

    /// Build a bar from the current config
    pub fn build_bar(&self) -> Bar {
        self.config.load().build_bar(&self.registry)
    }

    /// Re-read the file and build a bar from it
    ///
    /// On failure the current config stays in place and the error is kept
    /// in [`last_error`](Self::last_error).
    pub fn reload(&self) -> Result<Bar, ConfigError> {
        match Config::load_from_path(&self.path) {
            Ok(config) => {
                let bar = config.build_bar(&self.registry);
                self.config.store(Arc::new(config));
                self.last_error.store(None);
                info!("Reloaded config from {}", self.path.display());
                Ok(bar)
            }
            Err(e) => {
                error!("Failed to reload config, keeping current bar: {}", e);
                self.last_error.store(Some(Arc::new(e.to_string())));
                Err(e)
            }
        }
    }

    /// Drive the status stream until `shutdown` fires
    ///
    /// Writes the protocol header once, then runs one bar at a time. Each
    /// signal on `changes` (debounced) replaces the bar with one built from
    /// the re-read file.
    pub async fn run(
        &self,
        output: Output,
        clicks: ClickLines,
        mut changes: Option<mpsc::Receiver<()>>,
        shutdown: CancellationToken,
    ) -> Result<()> {
        output
            .write_handshake(&Header::default())
            .context("Failed to write protocol header")?;

        let mut running = self.build_bar().start(output.clone(), clicks);
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                changed = next_change(&mut changes) => {
                    if !changed {
                        debug!("Config change stream closed");
                        changes = None;
                        continue;
                    }
                    debounce(&mut changes).await;
                    let Ok(bar) = self.reload() else {
                        continue;
                    };
                    let clicks = running.stop().await?;
                    running = bar.start(output.clone(), clicks);
                }
            }
        }

        running.stop().await?;
        info!("Status stream stopped");
        Ok(())
    }
}

/// Wait for a change signal; `false` once the sender is gone
async fn next_change(changes: &mut Option<mpsc::Receiver<()>>) -> bool {
    match changes {
        Some(rx) => rx.recv().await.is_some(),
        None => std::future::pending().await,
    }
}

/// Let a burst of change events settle, then drop the ones it queued
async fn debounce(changes: &mut Option<mpsc::Receiver<()>>) {
    tokio::time::sleep(RELOAD_DEBOUNCE).await;
    if let Some(rx) = changes {
        while rx.try_recv().is_ok() {}
    }
}
