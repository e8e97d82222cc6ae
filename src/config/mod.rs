//! Configuration management for XDash
//!
//! Handles loading, validating and saving `xdash.config.toml`. The `[Config]`
//! section carries the launch settings; `[Input]` and `[Emulator]` tune the
//! controller and process polling. Every key is optional.

pub mod store;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

pub use store::{ConfigStore, ConfigStoreHandle};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(rename = "Config", default)]
    pub launch: LaunchConfig,
    #[serde(rename = "Input", default)]
    pub input: InputConfig,
    #[serde(rename = "Emulator", default)]
    pub emulator: EmulatorConfig,
}

/// Launch settings persisted across sessions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaunchConfig {
    #[serde(default)]
    pub netplay: bool,
    #[serde(default)]
    pub default_rom: String,
    #[serde(default)]
    pub controller_type: ControllerType,
}

/// Which controller backends to poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerType {
    #[default]
    Any,
    XInput,
    #[serde(alias = "sdl", alias = "directinput")]
    Gilrs,
}

impl ControllerType {
    pub fn uses_xinput(self) -> bool {
        matches!(self, Self::Any | Self::XInput)
    }

    pub fn uses_gilrs(self) -> bool {
        matches!(self, Self::Any | Self::Gilrs)
    }
}

/// Controller polling and filtering
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_deadzone")]
    pub deadzone: f32,
    #[serde(default = "default_stick_threshold")]
    pub stick_threshold: f32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

/// Emulator executables and liveness polling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmulatorConfig {
    #[serde(default = "default_normal_executable")]
    pub normal_executable: String,
    #[serde(default = "default_netplay_executable")]
    pub netplay_executable: String,
    #[serde(default = "default_check_interval")]
    pub check_interval_ms: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            netplay: false,
            default_rom: String::new(),
            controller_type: ControllerType::Any,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            deadzone: default_deadzone(),
            stick_threshold: default_stick_threshold(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl InputConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            normal_executable: default_normal_executable(),
            netplay_executable: default_netplay_executable(),
            check_interval_ms: default_check_interval(),
        }
    }
}

impl EmulatorConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

impl AppConfig {
    /// Parse configuration from TOML text with validation
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with validation
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Save configuration to file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
            }
        }

        fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Load the config, falling back to defaults on any failure
    ///
    /// A missing file is created with the defaults. Read, parse and write
    /// failures are logged and never abort startup.
    pub async fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save(path).await {
                Ok(()) => info!("Created default config file: {}", path.display()),
                Err(e) => warn!("Failed to create default config: {:#}", e),
            }
            return config;
        }

        match Self::load(path).await {
            Ok(config) => {
                debug!("Loaded config: {:?}", config);
                config
            },
            Err(e) => {
                warn!("Error loading config (using defaults): {:#}", e);
                Self::default()
            },
        }
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        let input = &self.input;
        if !(0.0..1.0).contains(&input.deadzone) {
            anyhow::bail!("Input deadzone {} must be in [0.0, 1.0)", input.deadzone);
        }
        if !(input.stick_threshold > 0.0 && input.stick_threshold <= 1.0) {
            anyhow::bail!(
                "Input stick_threshold {} must be in (0.0, 1.0]",
                input.stick_threshold
            );
        }
        if input.poll_interval_ms == 0 {
            anyhow::bail!("Input poll_interval_ms cannot be 0");
        }

        let emulator = &self.emulator;
        if emulator.normal_executable.trim().is_empty() {
            anyhow::bail!("Emulator normal_executable cannot be empty");
        }
        if emulator.netplay_executable.trim().is_empty() {
            anyhow::bail!("Emulator netplay_executable cannot be empty");
        }
        if emulator.check_interval_ms == 0 {
            anyhow::bail!("Emulator check_interval_ms cannot be 0");
        }

        Ok(())
    }
}

// Default value functions
fn default_deadzone() -> f32 { 0.2 }
fn default_stick_threshold() -> f32 { 0.5 }
fn default_poll_interval() -> u64 { 50 }
fn default_normal_executable() -> String { "xenia_canary.exe".to_string() }
fn default_netplay_executable() -> String { "xenia_canary_netplay.exe".to_string() }
fn default_check_interval() -> u64 { 2000 }
