//! Layout file watcher for hot reload

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::ContentRegistry;
use crate::error::ContentError;

/// Delay before re-reading, so editors finish writing
const SETTLE_DELAY: Duration = Duration::from_millis(100);

pub type ReloadResult = Result<ContentRegistry, ContentError>;

/// Watches the HDD directory and reloads the layout when it changes
///
/// The directory is watched instead of the file so that editors which replace
/// the file (write to temp, rename) and a layout created after startup are
/// both picked up.
pub struct LayoutWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<ReloadResult>,
}

impl LayoutWatcher {
    /// Start watching `layout_path`; reloads run on `runtime`
    pub fn new(layout_path: PathBuf, runtime: Handle) -> Result<Self> {
        let (tx, rx) = mpsc::channel(4);

        let watch_dir = layout_path
            .parent()
            .map(Path::to_path_buf)
            .context("Layout path has no parent directory")?;
        let file_name = layout_path
            .file_name()
            .map(|n| n.to_os_string())
            .context("Layout path has no file name")?;

        // Several events arrive per save; one reload covers them all
        let reload_pending = Arc::new(AtomicBool::new(false));

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    error!("Layout watch error: {}", e);
                    return;
                },
            };

            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }
            if !event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()))
            {
                return;
            }
            if reload_pending.swap(true, Ordering::SeqCst) {
                return;
            }

            debug!("Layout file changed: {:?}", event.paths);

            let layout_path = layout_path.clone();
            let tx = tx.clone();
            let reload_pending = reload_pending.clone();

            runtime.spawn(async move {
                tokio::time::sleep(SETTLE_DELAY).await;
                reload_pending.store(false, Ordering::SeqCst);

                let result = tokio::task::spawn_blocking(move || ContentRegistry::load(&layout_path))
                    .await;

                let result = match result {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Layout reload task failed: {}", e);
                        return;
                    },
                };

                match &result {
                    Ok(registry) => info!("Layout reloaded ({} entries)", registry.len()),
                    Err(e) => warn!("Layout reload produced no content: {}", e),
                }

                if let Err(e) = tx.send(result).await {
                    debug!("Layout watcher receiver dropped: {}", e);
                }
            });
        })?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch HDD directory: {}", watch_dir.display()))?;

        info!("Layout watcher started for: {}", watch_dir.display());

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Take a finished reload without waiting
    pub fn try_next(&mut self) -> Option<ReloadResult> {
        self.rx.try_recv().ok()
    }
}
