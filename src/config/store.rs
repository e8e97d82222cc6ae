//! Debounced writer for `xdash.config.toml`
//!
//! The UI thread never touches the config file directly. Every change to the
//! persisted settings (default content, netplay flag) is handed to this actor,
//! which keeps only the latest [`AppConfig`] and writes it once the debounce
//! window has passed without further requests.
//!
//! Writes are best-effort: a failure is logged and the in-memory config stays
//! authoritative for the rest of the session.

use super::AppConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, trace, warn};

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

#[derive(Debug)]
enum StoreCommand {
    /// Queue a config for writing (last write wins)
    Save(AppConfig),
    /// Write any pending config now
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Actor owning the config file
pub struct ConfigStore {
    path: PathBuf,
    command_rx: mpsc::Receiver<StoreCommand>,
    pending: Option<AppConfig>,
    last_request: Instant,
    debounce_ms: u64,
    write_count: u64,
}

/// Cloneable handle to the config writer
#[derive(Clone)]
pub struct ConfigStoreHandle {
    cmd_tx: mpsc::Sender<StoreCommand>,
}

impl ConfigStore {
    /// Spawn the writer on the current tokio runtime
    ///
    /// A `debounce_ms` of 0 writes every request immediately.
    pub fn spawn(path: impl Into<PathBuf>, debounce_ms: u64) -> ConfigStoreHandle {
        let (cmd_tx, command_rx) = mpsc::channel(32);

        let store = ConfigStore {
            path: path.into(),
            command_rx,
            pending: None,
            last_request: Instant::now(),
            debounce_ms,
            write_count: 0,
        };

        tokio::spawn(store.run());

        ConfigStoreHandle { cmd_tx }
    }

    async fn run(mut self) {
        info!(
            "Config store started for {} (debounce: {}ms)",
            self.path.display(),
            self.debounce_ms
        );

        let tick_ms = if self.debounce_ms > 0 { self.debounce_ms } else { 1000 };
        let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms));

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(StoreCommand::Save(config)) => {
                            trace!("Queued config write");
                            self.pending = Some(config);
                            self.last_request = Instant::now();
                            if self.debounce_ms == 0 {
                                self.write_pending().await;
                            }
                        }
                        Some(StoreCommand::Flush(reply)) => {
                            self.write_pending().await;
                            let _ = reply.send(());
                        }
                        Some(StoreCommand::Shutdown) | None => {
                            self.write_pending().await;
                            info!("Config store stopped (total writes: {})", self.write_count);
                            return;
                        }
                    }
                }
                _ = ticker.tick() => {
                    if self.pending.is_some()
                        && self.last_request.elapsed() >= Duration::from_millis(self.debounce_ms)
                    {
                        self.write_pending().await;
                    }
                }
            }
        }
    }

    async fn write_pending(&mut self) {
        let Some(config) = self.pending.take() else {
            return;
        };

        match config.save(&self.path).await {
            Ok(()) => {
                self.write_count += 1;
                trace!("Config written (write #{})", self.write_count);
            },
            Err(e) => error!("Failed to save config: {:#}", e),
        }
    }
}

impl ConfigStoreHandle {
    /// Queue a write without blocking the caller
    ///
    /// Used from the UI thread. When the queue is full the request is
    /// dropped with a warning; the next change queues a fresh snapshot.
    pub fn request_save(&self, config: AppConfig) {
        if let Err(e) = self.cmd_tx.try_send(StoreCommand::Save(config)) {
            warn!("Config save request dropped: {}", e);
        }
    }

    /// Write any pending config before returning
    pub async fn flush(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(StoreCommand::Flush(tx))
            .await
            .context("Failed to send flush command: config store shut down")?;

        rx.await.context("Failed to receive flush response")
    }

    /// Signal the writer to flush and stop
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.try_send(StoreCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_with_default(name: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.launch.default_rom = name.to_string();
        config
    }

    #[tokio::test]
    async fn test_immediate_write_without_debounce() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("xdash.config.toml");
        let handle = ConfigStore::spawn(&path, 0);

        handle.request_save(config_with_default("Halo 3"));
        handle.flush().await.unwrap();

        let loaded = AppConfig::load(&path).await.unwrap();
        assert_eq!(loaded.launch.default_rom, "Halo 3");

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_flush_overrides_debounce() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("xdash.config.toml");
        let handle = ConfigStore::spawn(&path, 10_000);

        handle.request_save(config_with_default("Gears"));
        assert!(!path.exists());

        handle.flush().await.unwrap();
        assert!(path.exists());

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_debounce_keeps_last_request() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("xdash.config.toml");
        let handle = ConfigStore::spawn(&path, 100);

        for name in ["A", "B", "C"] {
            handle.request_save(config_with_default(name));
        }

        tokio::time::sleep(Duration::from_millis(350)).await;

        let loaded = AppConfig::load(&path).await.unwrap();
        assert_eq!(loaded.launch.default_rom, "C");

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_shutdown_writes_pending() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("xdash.config.toml");
        let handle = ConfigStore::spawn(&path, 10_000);

        handle.request_save(config_with_default("Last"));
        handle.shutdown();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let loaded = AppConfig::load(&path).await.unwrap();
        assert_eq!(loaded.launch.default_rom, "Last");
        assert!(handle.flush().await.is_err());
    }
}
