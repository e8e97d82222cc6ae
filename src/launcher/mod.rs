//! Launcher engine: the state behind the window
//!
//! Owns the config, the content registry, the selection, the focus ring, the
//! controller manager and the process supervisor. The UI calls [`Launcher::tick`]
//! every frame; the tick decides when to check the emulator and when to poll
//! controllers, so no timers or threads are involved.
//!
//! Controller input is suppressed exactly while an emulator started here is
//! running.

pub mod focus;

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfigStoreHandle};
use crate::content::ContentRegistry;
use crate::error::{ContentError, LaunchError};
use crate::input::{ControllerManager, ControllerState, LogicalControl};
use crate::paths::AppPaths;
use crate::process::{EmulatorLayout, LaunchMode, ProcessEvent, ProcessSupervisor};

pub use focus::{FocusRing, FocusTarget, NavDirection};

/// A message shown on top of the window until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&LaunchError> for Notice {
    fn from(err: &LaunchError) -> Self {
        let message = match err {
            LaunchError::ExecutableNotFound(path) => format!(
                "Cannot find the emulator at:\n{}\n\nPlease check your Xenia folder.",
                path.display()
            ),
            LaunchError::ContentNotFound(path) => format!(
                "Cannot find:\n{}\n\nPlease check the path in layout.json.",
                path.display()
            ),
            other => other.to_string(),
        };
        Notice::new(err.title(), message)
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The emulator exited or was lost
    pub process_event: Option<ProcessEvent>,
    /// Whether controllers were polled
    pub polled: bool,
    /// Controller activations acted on
    pub applied: Vec<LogicalControl>,
}

pub struct Launcher {
    paths: AppPaths,
    config: AppConfig,
    registry: ContentRegistry,
    content_error: Option<String>,
    selected: Option<String>,
    focus: FocusRing,
    controllers: ControllerManager,
    supervisor: ProcessSupervisor,
    store: Option<ConfigStoreHandle>,
    notice: Option<Notice>,
    poll_interval: Duration,
    last_poll: Option<Instant>,
}

impl Launcher {
    /// Build the launcher and load the layout file
    pub fn new(
        paths: AppPaths,
        config: AppConfig,
        controllers: ControllerManager,
        store: Option<ConfigStoreHandle>,
    ) -> Self {
        let content = ContentRegistry::load(&paths.layout_file);
        Self::with_content(paths, config, content, controllers, store)
    }

    /// Build the launcher from an already loaded layout
    pub fn with_content(
        paths: AppPaths,
        config: AppConfig,
        content: Result<ContentRegistry, ContentError>,
        controllers: ControllerManager,
        store: Option<ConfigStoreHandle>,
    ) -> Self {
        let supervisor = ProcessSupervisor::new(
            EmulatorLayout::new(&paths.xenia_dir, &config.emulator),
            config.emulator.check_interval(),
        );
        info!(
            "Initial mode: {}, using executable: {}",
            LaunchMode::from_netplay(config.launch.netplay),
            supervisor
                .executable(LaunchMode::from_netplay(config.launch.netplay))
                .display()
        );

        let mut launcher = Self {
            poll_interval: config.input.poll_interval(),
            paths,
            config,
            registry: ContentRegistry::default(),
            content_error: None,
            selected: None,
            focus: FocusRing::new(false),
            controllers,
            supervisor,
            store,
            notice: None,
            last_poll: None,
        };
        launcher.replace_content(content);
        launcher
    }

    // ----- tick -----

    /// Advance the engine to `now`
    ///
    /// 1. Check the emulator if the check interval elapsed; an exit lifts
    ///    controller suppression.
    /// 2. Poll controllers if the poll interval elapsed and act on new presses.
    /// 3. Keep suppression in line with emulator liveness.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        if let Some(event) = self.supervisor.check(now) {
            match &event {
                ProcessEvent::Exited { code, .. } => {
                    info!("Xenia closed (exit code {:?}), controller input re-enabled", code)
                },
                ProcessEvent::Lost { .. } => warn!("Xenia status unknown, controller input re-enabled"),
            }
            self.controllers.set_suppressed(false);
            report.process_event = Some(event);
        }

        let poll_due = self
            .last_poll
            .map_or(true, |last| now.saturating_duration_since(last) >= self.poll_interval);
        if poll_due {
            self.last_poll = Some(now);
            report.polled = true;

            let outcome = self.controllers.poll();
            for control in outcome.events {
                // A launch in this batch suppresses the rest of it
                if self.supervisor.is_live() {
                    break;
                }
                self.handle_control(control);
                report.applied.push(control);
            }
        }

        self.controllers.set_suppressed(self.supervisor.is_live());
        report
    }

    /// Time until the next scheduled poll or check
    pub fn next_wakeup(&self) -> Duration {
        self.poll_interval
    }

    // ----- controls -----

    /// Apply one logical control
    ///
    /// With a notice open only confirm and cancel do anything: they close it.
    pub fn handle_control(&mut self, control: LogicalControl) {
        if self.notice.is_some() {
            if matches!(control, LogicalControl::Confirm | LogicalControl::Cancel) {
                self.dismiss_notice();
            }
            return;
        }

        match control {
            LogicalControl::Up => self.navigate(NavDirection::Up),
            LogicalControl::Down => self.navigate(NavDirection::Down),
            LogicalControl::Left => self.navigate(NavDirection::Left),
            LogicalControl::Right => self.navigate(NavDirection::Right),
            LogicalControl::Confirm => self.activate_focused(),
            LogicalControl::Cancel => debug!("Cancel has no action"),
            LogicalControl::Start => {
                if self.has_content() {
                    let _ = self.launch_selected();
                }
            },
            LogicalControl::Back => {
                self.set_default();
            },
        }
    }

    /// Up/down move focus (wrapping); left/right change the selected entry
    /// while the content selector is focused
    pub fn navigate(&mut self, direction: NavDirection) {
        match direction {
            NavDirection::Up => {
                let target = self.focus.prev();
                debug!("Focus: {}", target.label());
            },
            NavDirection::Down => {
                let target = self.focus.next();
                debug!("Focus: {}", target.label());
            },
            NavDirection::Left | NavDirection::Right => {
                if self.focus.is_focused(FocusTarget::ContentSelector) {
                    let delta = if direction == NavDirection::Left { -1 } else { 1 };
                    self.select_offset(delta);
                }
            },
        }
    }

    /// Run the focused widget's action; the selector has none
    pub fn activate_focused(&mut self) {
        match self.focus.current() {
            FocusTarget::ContentSelector => {},
            FocusTarget::LaunchButton => {
                let _ = self.launch_selected();
            },
            FocusTarget::SetDefaultButton => {
                self.set_default();
            },
            FocusTarget::NetplayToggle => self.toggle_netplay(),
            FocusTarget::RetryButton => self.reload_content(),
        }
    }

    pub fn focus_target(&mut self, target: FocusTarget) -> bool {
        self.focus.focus(target)
    }

    pub fn dismiss_notice(&mut self) {
        if let Some(notice) = self.notice.take() {
            debug!("Notice dismissed: {}", notice.title);
        }
    }

    // ----- operations -----

    /// Launch the selected entry with the current mode
    ///
    /// Failures other than a missing selection also open a notice.
    pub fn launch_selected(&mut self) -> Result<u32, LaunchError> {
        let result = self.try_launch();
        match &result {
            Ok(pid) => {
                self.controllers.set_suppressed(true);
                info!("Xenia running (pid {}), controller input disabled", pid);
            },
            Err(LaunchError::NoSelection) => debug!("Launch ignored: no content selected"),
            Err(e) => {
                warn!("Launch failed: {}", e);
                self.notice = Some(Notice::from(e));
            },
        }
        result
    }

    fn try_launch(&mut self) -> Result<u32, LaunchError> {
        let name = self.selected.as_deref().ok_or(LaunchError::NoSelection)?;
        let path = self
            .registry
            .resolve(name, &self.paths.hdd_dir)
            .ok_or(LaunchError::NoSelection)?;
        let mode = LaunchMode::from_netplay(self.config.launch.netplay);

        let process = self.supervisor.launch(&path, mode)?;
        Ok(process.pid)
    }

    /// Make the selected entry the default and persist it
    pub fn set_default(&mut self) -> bool {
        let Some(name) = self.selected.clone() else {
            return false;
        };
        if self.config.launch.default_rom != name {
            self.config.launch.default_rom = name.clone();
            self.persist();
        }
        info!("Set default content to: {}", name);
        true
    }

    pub fn toggle_netplay(&mut self) {
        self.set_netplay(!self.config.launch.netplay);
    }

    pub fn set_netplay(&mut self, netplay: bool) {
        if self.config.launch.netplay == netplay {
            return;
        }
        self.config.launch.netplay = netplay;
        let mode = LaunchMode::from_netplay(netplay);
        info!(
            "Mode: {}, using executable: {}",
            mode,
            self.supervisor.executable(mode).display()
        );
        self.persist();
    }

    /// Select an entry by name
    pub fn select(&mut self, name: &str) -> bool {
        if !self.registry.contains(name) {
            return false;
        }
        if self.selected.as_deref() != Some(name) {
            debug!("Selected: {}", name);
            self.selected = Some(name.to_string());
        }
        true
    }

    /// Move the selection by `delta` entries, clamped at the ends
    pub fn select_offset(&mut self, delta: isize) -> bool {
        let current = self.selected.as_deref().unwrap_or_default();
        let Some(name) = self.registry.neighbour(current, delta).map(|e| e.name.clone()) else {
            return false;
        };
        self.select(&name)
    }

    /// Re-read the layout file (retry button)
    pub fn reload_content(&mut self) {
        info!("Reloading {}", self.paths.layout_file.display());
        let content = ContentRegistry::load(&self.paths.layout_file);
        self.replace_content(content);
    }

    /// Swap in a freshly loaded layout, keeping the selection when possible
    pub fn replace_content(&mut self, content: Result<ContentRegistry, ContentError>) {
        match content {
            Ok(registry) => {
                self.registry = registry;
                self.content_error = None;
            },
            Err(e) => {
                warn!("No HDD content found: {}", e);
                self.registry = ContentRegistry::default();
                self.content_error = Some(e.to_string());
            },
        }

        let previous_focus = self.focus.current();
        self.focus = FocusRing::new(self.has_content());
        self.focus.focus(previous_focus);

        let keep = self
            .selected
            .as_deref()
            .is_some_and(|name| self.registry.contains(name));
        if !keep {
            self.selected = None;
            self.resolve_default_selection();
        }
    }

    /// Select the configured default, or the first entry
    ///
    /// An empty `default_rom` is filled with the first entry and saved.
    fn resolve_default_selection(&mut self) {
        let Some(entry) = self.registry.default_entry(&self.config.launch.default_rom) else {
            return;
        };
        let name = entry.name.clone();

        if self.config.launch.default_rom.is_empty() {
            info!("No default content configured, using: {}", name);
            self.config.launch.default_rom = name.clone();
            self.persist();
        }
        self.selected = Some(name);
    }

    fn persist(&self) {
        match &self.store {
            Some(store) => store.request_save(self.config.clone()),
            None => debug!("No config store attached, change kept in memory"),
        }
    }

    // ----- views -----

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn has_content(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn content_error(&self) -> Option<&str> {
        self.content_error.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn netplay(&self) -> bool {
        self.config.launch.netplay
    }

    pub fn is_running(&self) -> bool {
        self.supervisor.is_live()
    }

    pub fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }

    pub fn controller_state(&self) -> &ControllerState {
        self.controllers.state()
    }

    pub fn controller_status(&self) -> String {
        let base = match self.controllers.connected_backend() {
            Some(kind) => format!("Controller: Connected ({})", kind.as_str().to_uppercase()),
            None => "Controller: No controller".to_string(),
        };
        if self.controllers.is_suppressed() {
            format!("{} (Disabled - Xenia Running)", base)
        } else {
            base
        }
    }

    pub fn emulator_status(&self) -> &'static str {
        if self.supervisor.is_live() {
            "Xenia: Running (Controller Disabled)"
        } else {
            "Xenia: Not Running"
        }
    }
}
