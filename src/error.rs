//! Error types surfaced to the UI layer
//!
//! Both families are non-fatal for the application: they abort the attempted
//! operation and end up as a notice on screen.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the layout file yields no content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("layout file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read layout file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse layout file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("layout file {} must contain a JSON object", .0.display())]
    NotAnObject(PathBuf),

    #[error("layout entry {name:?} must map a non-empty name to a path string")]
    InvalidEntry { name: String },

    #[error("layout file {} has no entries", .0.display())]
    Empty(PathBuf),
}

/// Reasons a launch attempt was aborted before or while spawning
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no content selected")]
    NoSelection,

    #[error("executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("content file not found: {}", .0.display())]
    ContentNotFound(PathBuf),

    #[error("emulator already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    #[error("failed to start {}: {source}", exe.display())]
    Spawn {
        exe: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Short title for the error pop-up
    pub fn title(&self) -> &'static str {
        match self {
            Self::NoSelection => "No Content Selected",
            Self::ExecutableNotFound(_) => "Executable Not Found",
            Self::ContentNotFound(_) => "Content Not Found",
            Self::AlreadyRunning { .. } => "Already Running",
            Self::Spawn { .. } => "Launch Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error_titles() {
        let err = LaunchError::ExecutableNotFound(PathBuf::from("Xenia/xenia_canary.exe"));
        assert_eq!(err.title(), "Executable Not Found");
        assert!(err.to_string().contains("xenia_canary.exe"));

        let err = LaunchError::AlreadyRunning { pid: 42 };
        assert_eq!(err.title(), "Already Running");
        assert_eq!(err.to_string(), "emulator already running (pid 42)");
    }
}
