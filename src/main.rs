//! XDash - Xbox 360 content launcher for Xenia Canary

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xdash::cli::{self, Args};
use xdash::config::{store::DEFAULT_DEBOUNCE_MS, AppConfig, ConfigStore};
use xdash::content::LayoutWatcher;
use xdash::input::{print_controller_diagnostics, ControllerManager};
use xdash::{ui, AppPaths, Launcher};

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let paths = AppPaths::detect(args.base_dir.as_deref());
    if let Err(e) = paths.ensure_directories() {
        eprintln!("[xdash] {:#}", e);
    }

    // Keep the guard alive so buffered file logs are written on exit
    let _log_guard = init_logging(&args.log_level, &paths.logs_dir)?;

    info!("Starting XDash v{}...", env!("CARGO_PKG_VERSION"));
    info!("Base directory: {}", paths.base_dir.display());

    if args.list_controllers {
        print_controller_diagnostics();
        return Ok(());
    }

    // Runtime for the config writer and the layout watcher; the UI owns the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("xdash-rt")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let _enter = runtime.enter();

    let config = runtime.block_on(AppConfig::load_or_create(&paths.config_file));
    info!("Configuration file: {}", paths.config_file.display());

    if args.check {
        cli::print_check(&paths, &config);
        return Ok(());
    }

    let store = ConfigStore::spawn(paths.config_file.clone(), DEFAULT_DEBOUNCE_MS);
    let controllers = ControllerManager::new(config.launch.controller_type, &config.input);

    let watcher = match LayoutWatcher::new(paths.layout_file.clone(), runtime.handle().clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Layout hot reload disabled: {:#}", e);
            None
        },
    };

    let launcher = Launcher::new(paths, config, controllers, Some(store.clone()));

    let result = ui::run(launcher, watcher);

    // Write the last settings change before leaving
    if let Err(e) = runtime.block_on(store.flush()) {
        warn!("Failed to flush config: {:#}", e);
    }
    store.shutdown();

    info!("XDash shutdown complete");
    result
}

fn init_logging(level: &str, logs_dir: &Path) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let (file_layer, guard) = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("xdash.log")
        .build(logs_dir)
    {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        },
        Err(e) => {
            eprintln!("[xdash] File logging disabled: {}", e);
            (None, None)
        },
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
