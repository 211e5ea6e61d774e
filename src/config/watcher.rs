//! Config file change notifications

use super::ConfigError;
use log::{debug, trace, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Watches the directory containing the config file
///
/// Editors often replace files instead of writing them in place, so the
/// parent directory is watched and events are filtered by file name.
/// Dropping the watcher stops the notifications.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `path`; the receiver yields once per burst of changes
    pub fn spawn(path: &Path) -> Result<(Self, mpsc::Receiver<()>), ConfigError> {
        let (tx, rx) = mpsc::channel(1);
        let file_name = path.file_name().map(|name| name.to_os_string());
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!("Config watch error: {}", e);
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            let touches_config = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if touches_config {
                trace!("Config change event: {:?}", event.kind);
                // a full channel already holds a pending reload
                let _ = tx.try_send(());
            }
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!("Watching {} for config changes", dir.display());

        Ok((Self { _watcher: watcher }, rx))
    }
}
