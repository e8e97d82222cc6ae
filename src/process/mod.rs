//! Emulator process launching and supervision

pub mod supervisor;

use std::fmt;
use std::path::PathBuf;

use crate::config::EmulatorConfig;

pub use supervisor::{MonitoredProcess, ProcessEvent, ProcessSupervisor};

/// Which emulator build to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchMode {
    Normal,
    Netplay,
}

impl LaunchMode {
    pub fn from_netplay(netplay: bool) -> Self {
        if netplay {
            Self::Netplay
        } else {
            Self::Normal
        }
    }

    pub fn is_netplay(self) -> bool {
        self == Self::Netplay
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Netplay => f.write_str("netplay"),
        }
    }
}

/// Where the emulator executables live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorLayout {
    pub xenia_dir: PathBuf,
    pub normal_executable: String,
    pub netplay_executable: String,
}

impl EmulatorLayout {
    pub fn new(xenia_dir: impl Into<PathBuf>, config: &EmulatorConfig) -> Self {
        Self {
            xenia_dir: xenia_dir.into(),
            normal_executable: config.normal_executable.clone(),
            netplay_executable: config.netplay_executable.clone(),
        }
    }

    pub fn executable(&self, mode: LaunchMode) -> PathBuf {
        let name = match mode {
            LaunchMode::Normal => &self.normal_executable,
            LaunchMode::Netplay => &self.netplay_executable,
        };
        self.xenia_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_per_mode() {
        let layout = EmulatorLayout::new("/base/Xenia", &EmulatorConfig::default());
        assert_eq!(
            layout.executable(LaunchMode::Normal),
            PathBuf::from("/base/Xenia/xenia_canary.exe")
        );
        assert_eq!(
            layout.executable(LaunchMode::Netplay),
            PathBuf::from("/base/Xenia/xenia_canary_netplay.exe")
        );
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(LaunchMode::from_netplay(false), LaunchMode::Normal);
        assert!(LaunchMode::from_netplay(true).is_netplay());
        assert_eq!(LaunchMode::Netplay.to_string(), "netplay");
    }
}
