//! Application path management.
//!
//! XDash is portable: everything lives next to the executable.
//!
//! ```text
//! <base>/
//!   xdash.config.toml
//!   Xenia/xenia_canary.exe, xenia_canary_netplay.exe
//!   XDash HDD/layout.json
//!   assets/icon.png, icon.ico
//!   logs/
//! ```

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "xdash.config.toml";
pub const HDD_DIR_NAME: &str = "XDash HDD";
pub const LAYOUT_FILE_NAME: &str = "layout.json";

/// Resolved locations of every file XDash reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub base_dir: PathBuf,
    pub config_file: PathBuf,
    pub xenia_dir: PathBuf,
    pub hdd_dir: PathBuf,
    pub layout_file: PathBuf,
    pub assets_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    /// Detect the base directory.
    ///
    /// An explicit `base_override` (from `--base-dir`) always wins.
    ///
    /// **Debug mode**: if the current working directory holds a config file
    /// or an `XDash HDD` folder (typical with `cargo run`), use it.
    ///
    /// Otherwise the executable's directory is the base.
    ///
    /// Note: This is called before logging is initialized, so we use eprintln
    /// for early diagnostic output.
    pub fn detect(base_override: Option<&Path>) -> Self {
        if let Some(base) = base_override {
            return Self::from_base(base);
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        #[cfg(debug_assertions)]
        {
            eprintln!("[paths] Executable directory: {}", exe_dir.display());

            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            if cwd.join(CONFIG_FILE_NAME).exists() || cwd.join(HDD_DIR_NAME).is_dir() {
                eprintln!("[paths] Running in DEV mode (base: {})", cwd.display());
                return Self::from_base(&cwd);
            }
        }

        Self::from_base(&exe_dir)
    }

    /// Lay out every path under `base`, made absolute against the cwd
    pub fn from_base(base: &Path) -> Self {
        let base_dir = if base.is_absolute() {
            base.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(base))
                .unwrap_or_else(|_| base.to_path_buf())
        };

        let hdd_dir = base_dir.join(HDD_DIR_NAME);
        Self {
            config_file: base_dir.join(CONFIG_FILE_NAME),
            xenia_dir: base_dir.join("Xenia"),
            layout_file: hdd_dir.join(LAYOUT_FILE_NAME),
            hdd_dir,
            assets_dir: base_dir.join("assets"),
            logs_dir: base_dir.join("logs"),
            base_dir,
        }
    }

    pub fn icon_png(&self) -> PathBuf {
        self.assets_dir.join("icon.png")
    }

    pub fn icon_ico(&self) -> PathBuf {
        self.assets_dir.join("icon.ico")
    }

    /// Source for the window icon: `icon.ico` on Windows when present,
    /// otherwise `icon.png`
    pub fn window_icon(&self) -> PathBuf {
        self.pick_window_icon(cfg!(windows))
    }

    fn pick_window_icon(&self, prefer_ico: bool) -> PathBuf {
        let ico = self.icon_ico();
        if prefer_ico && ico.exists() {
            ico
        } else {
            self.icon_png()
        }
    }

    /// Ensure the directories XDash writes to exist.
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        if !self.logs_dir.exists() {
            debug!("Creating logs directory: {}", self.logs_dir.display());
            std::fs::create_dir_all(&self.logs_dir).with_context(|| {
                format!("Failed to create logs directory: {}", self.logs_dir.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_layout_under_base() {
        let paths = AppPaths::from_base(Path::new("/opt/xdash"));

        assert_eq!(paths.config_file, PathBuf::from("/opt/xdash/xdash.config.toml"));
        assert_eq!(paths.xenia_dir, PathBuf::from("/opt/xdash/Xenia"));
        assert_eq!(
            paths.layout_file,
            PathBuf::from("/opt/xdash/XDash HDD/layout.json")
        );
        assert_eq!(paths.icon_png(), PathBuf::from("/opt/xdash/assets/icon.png"));
        assert_eq!(paths.logs_dir, PathBuf::from("/opt/xdash/logs"));
    }

    #[test]
    fn test_relative_base_made_absolute() {
        let paths = AppPaths::from_base(Path::new("portable"));
        assert!(paths.base_dir.is_absolute());
        assert!(paths.base_dir.ends_with("portable"));
    }

    #[cfg(unix)]
    #[test]
    fn test_override_wins() {
        let paths = AppPaths::detect(Some(Path::new("/srv/xdash")));
        assert_eq!(paths.base_dir, PathBuf::from("/srv/xdash"));
    }

    #[test]
    fn test_window_icon_prefers_existing_ico() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::from_base(temp.path());
        assert_eq!(paths.pick_window_icon(true), paths.icon_png());

        std::fs::create_dir_all(&paths.assets_dir).unwrap();
        std::fs::write(paths.icon_ico(), b"").unwrap();
        assert_eq!(paths.pick_window_icon(true), paths.icon_ico());
        assert_eq!(paths.pick_window_icon(false), paths.icon_png());
    }

    #[test]
    fn test_ensure_directories() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::from_base(temp.path());
        paths.ensure_directories().unwrap();
        assert!(paths.logs_dir.is_dir());
        assert!(!paths.hdd_dir.exists());
    }
}
