//! Command-line arguments and the `--check` report

use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::content::ContentRegistry;
use crate::paths::AppPaths;
use crate::process::{EmulatorLayout, LaunchMode};

/// XDash - Xbox 360 content launcher for Xenia Canary
///
/// Running without arguments opens the launcher window.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding xdash.config.toml, Xenia/ and "XDash HDD/"
    /// (defaults to the executable's directory)
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// List detected controllers and exit
    #[arg(long)]
    pub list_controllers: bool,

    /// Print config, layout and emulator status and exit
    #[arg(long)]
    pub check: bool,
}

fn status(ok: bool) -> ColoredString {
    if ok {
        "OK".green()
    } else {
        "MISSING".red()
    }
}

fn print_path(label: &str, path: &Path) {
    println!("  {:<22} {} {}", label, status(path.exists()), path.display());
}

/// Print a readiness report for the installation under `paths`
///
/// Returns `true` when the layout loads and the normal executable exists.
pub fn print_check(paths: &AppPaths, config: &AppConfig) -> bool {
    println!("\n{}", "=== XDash Installation Check ===".bold().cyan());

    println!("\n{}", "Paths:".bold());
    println!("  {:<22} {}", "Base directory", paths.base_dir.display());
    print_path("Config file", &paths.config_file);
    print_path("Xenia directory", &paths.xenia_dir);
    print_path("HDD directory", &paths.hdd_dir);
    print_path("Logo", &paths.icon_png());

    println!("\n{}", "Config:".bold());
    println!(
        "  Mode: {}",
        LaunchMode::from_netplay(config.launch.netplay).to_string().yellow()
    );
    println!(
        "  Default content: {}",
        if config.launch.default_rom.is_empty() {
            "(none)".dimmed()
        } else {
            config.launch.default_rom.as_str().green()
        }
    );
    println!("  Controller type: {:?}", config.launch.controller_type);
    println!(
        "  Deadzone: {}  Poll: {}ms  Emulator check: {}ms",
        config.input.deadzone, config.input.poll_interval_ms, config.emulator.check_interval_ms
    );

    println!("\n{}", "Emulator:".bold());
    let layout = EmulatorLayout::new(&paths.xenia_dir, &config.emulator);
    for mode in [LaunchMode::Normal, LaunchMode::Netplay] {
        let exe = layout.executable(mode);
        println!(
            "  {:<22} {} {}",
            mode.to_string(),
            status(exe.exists()),
            exe.display()
        );
    }
    let emulator_ok = layout.executable(LaunchMode::Normal).exists();

    println!("\n{}", "Layout:".bold());
    let layout_ok = match ContentRegistry::load(&paths.layout_file) {
        Ok(registry) => {
            println!(
                "  {} entries in {}",
                registry.len().to_string().green(),
                paths.layout_file.display()
            );
            for entry in registry.entries() {
                let resolved = paths.hdd_dir.join(&entry.path);
                println!("    {} {} -> {}", status(resolved.exists()), entry.name, entry.path);
            }
            true
        },
        Err(e) => {
            println!("  {} {}", "ERROR".red().bold(), e);
            false
        },
    };

    let ready = layout_ok && emulator_ok;
    println!(
        "\n{}",
        if ready {
            "Ready to launch".green().bold()
        } else {
            "Not ready: fix the items above".red().bold()
        }
    );
    ready
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "xdash",
            "--base-dir",
            "portable",
            "--log-level",
            "debug",
            "--check",
        ])
        .unwrap();
        assert_eq!(args.base_dir, Some(PathBuf::from("portable")));
        assert_eq!(args.log_level, "debug");
        assert!(args.check);
        assert!(!args.list_controllers);
    }

    #[test]
    fn test_check_reports_missing_install() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::from_base(temp.path());
        assert!(!print_check(&paths, &AppConfig::default()));
    }

    #[test]
    fn test_check_ready_install() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::from_base(temp.path());
        fs::create_dir_all(&paths.xenia_dir).unwrap();
        fs::create_dir_all(&paths.hdd_dir).unwrap();
        fs::write(paths.xenia_dir.join("xenia_canary.exe"), "").unwrap();
        fs::write(&paths.layout_file, r#"{"Dashboard": "dash.xex"}"#).unwrap();

        assert!(print_check(&paths, &AppConfig::default()));
    }
}
