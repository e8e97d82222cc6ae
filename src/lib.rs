//! XDash - Xbox 360 content launcher for Xenia Canary
//!
//! Lists the content declared in `XDash HDD/layout.json`, launches the
//! selected entry in Xenia Canary (normal or netplay build) and lets a game
//! controller drive the whole window. Controller input is ignored while the
//! emulator it started is running.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod launcher;
pub mod paths;
pub mod process;
pub mod ui;

pub use config::AppConfig;
pub use error::{ContentError, LaunchError};
pub use launcher::Launcher;
pub use paths::AppPaths;
