//! Process supervisor: owns at most one running emulator
//!
//! Liveness is checked with a non-blocking `try_wait` on a fixed interval.
//! The supervisor never kills its child; closing XDash leaves the emulator
//! running.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{EmulatorLayout, LaunchMode};
use crate::error::LaunchError;

/// A running emulator and what it was started with
#[derive(Debug)]
pub struct MonitoredProcess {
    child: Child,
    pub pid: u32,
    pub mode: LaunchMode,
    pub executable: PathBuf,
    pub entry: PathBuf,
    pub started_at: DateTime<Local>,
}

/// Outcome of a liveness check that released the handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Exited { pid: u32, code: Option<i32> },
    /// The status query itself failed; the handle is dropped anyway
    Lost { pid: u32 },
}

#[derive(Debug)]
pub struct ProcessSupervisor {
    layout: EmulatorLayout,
    check_interval: Duration,
    current: Option<MonitoredProcess>,
    last_check: Option<Instant>,
}

impl ProcessSupervisor {
    pub fn new(layout: EmulatorLayout, check_interval: Duration) -> Self {
        Self {
            layout,
            check_interval,
            current: None,
            last_check: None,
        }
    }

    pub fn executable(&self, mode: LaunchMode) -> PathBuf {
        self.layout.executable(mode)
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&MonitoredProcess> {
        self.current.as_ref()
    }

    /// Start the emulator for `entry_path`
    ///
    /// Fails without spawning when the executable or the content is missing,
    /// or when an emulator started here is still running.
    pub fn launch(
        &mut self,
        entry_path: &Path,
        mode: LaunchMode,
    ) -> Result<&MonitoredProcess, LaunchError> {
        let executable = self.layout.executable(mode);

        if !executable.exists() {
            return Err(LaunchError::ExecutableNotFound(executable));
        }
        if !entry_path.exists() {
            return Err(LaunchError::ContentNotFound(entry_path.to_path_buf()));
        }
        if let Some(process) = &self.current {
            return Err(LaunchError::AlreadyRunning { pid: process.pid });
        }

        let mut cmd = Command::new(&executable);
        cmd.arg(entry_path);
        if let Some(dir) = executable.parent() {
            cmd.current_dir(dir);
        }
        detach_console(&mut cmd);

        info!(
            "Launching ({}): \"{}\" \"{}\"",
            mode,
            executable.display(),
            entry_path.display()
        );

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            exe: executable.clone(),
            source,
        })?;
        let pid = child.id();
        info!("Emulator started with pid {}", pid);

        self.last_check = Some(Instant::now());
        Ok(self.current.insert(MonitoredProcess {
            child,
            pid,
            mode,
            executable,
            entry: entry_path.to_path_buf(),
            started_at: Local::now(),
        }))
    }

    /// Check liveness if the check interval has elapsed since the last check
    pub fn check(&mut self, now: Instant) -> Option<ProcessEvent> {
        self.current.as_ref()?;

        let due = self
            .last_check
            .map_or(true, |last| now.saturating_duration_since(last) >= self.check_interval);
        if !due {
            return None;
        }
        self.last_check = Some(now);
        self.poll_child()
    }

    /// Check liveness immediately
    pub fn check_now(&mut self) -> Option<ProcessEvent> {
        self.last_check = Some(Instant::now());
        self.poll_child()
    }

    fn poll_child(&mut self) -> Option<ProcessEvent> {
        let process = self.current.as_mut()?;
        let pid = process.pid;

        let event = match process.child.try_wait() {
            Ok(None) => {
                debug!("Emulator pid {} still running", pid);
                return None;
            },
            Ok(Some(status)) => {
                let runtime = Local::now().signed_duration_since(process.started_at);
                info!(
                    "Emulator {} (pid {}) exited ({}) after {}s",
                    process.executable.display(),
                    pid,
                    status,
                    runtime.num_seconds()
                );
                ProcessEvent::Exited {
                    pid,
                    code: status.code(),
                }
            },
            Err(e) => {
                warn!("Lost track of emulator pid {}: {}", pid, e);
                ProcessEvent::Lost { pid }
            },
        };

        self.current = None;
        Some(event)
    }
}

/// Give the child its own console window or process group
fn detach_console(cmd: &mut Command) {
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
        cmd.creation_flags(CREATE_NEW_CONSOLE);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmulatorConfig;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        supervisor: ProcessSupervisor,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let xenia = dir.path().join("Xenia");
            fs::create_dir_all(&xenia).unwrap();
            let supervisor = ProcessSupervisor::new(
                EmulatorLayout::new(xenia, &EmulatorConfig::default()),
                Duration::from_millis(2000),
            );
            Self { dir, supervisor }
        }

        fn content(&self, name: &str, body: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, body).unwrap();
            path
        }

        /// Use the system shell as the emulator; the content file is its script
        #[cfg(unix)]
        fn install_shell(&self, mode: LaunchMode) {
            std::os::unix::fs::symlink("/bin/sh", self.supervisor.executable(mode)).unwrap();
        }

        fn wait_for_event(&mut self) -> ProcessEvent {
            let deadline = Instant::now() + Duration::from_secs(10);
            while Instant::now() < deadline {
                if let Some(event) = self.supervisor.check_now() {
                    return event;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            panic!("process did not exit in time");
        }
    }

    #[test]
    fn test_missing_executable() {
        let mut fx = Fixture::new();
        let content = fx.content("game.iso", "");

        let err = fx.supervisor.launch(&content, LaunchMode::Normal).unwrap_err();
        assert!(matches!(err, LaunchError::ExecutableNotFound(_)));
        assert!(!fx.supervisor.is_live());
    }

    #[test]
    fn test_missing_content_starts_nothing() {
        let mut fx = Fixture::new();
        fs::write(fx.supervisor.executable(LaunchMode::Normal), "").unwrap();
        let missing = fx.dir.path().join("nope.iso");

        let err = fx.supervisor.launch(&missing, LaunchMode::Normal).unwrap_err();
        assert!(matches!(err, LaunchError::ContentNotFound(p) if p == missing));
        assert!(!fx.supervisor.is_live());
        assert_eq!(fx.supervisor.check_now(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_fails_to_spawn() {
        let mut fx = Fixture::new();
        fs::write(fx.supervisor.executable(LaunchMode::Normal), "not a program").unwrap();
        let content = fx.content("game.iso", "");

        let err = fx.supervisor.launch(&content, LaunchMode::Normal).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(!fx.supervisor.is_live());
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_and_reap_exit_code() {
        let mut fx = Fixture::new();
        fx.install_shell(LaunchMode::Netplay);
        let content = fx.content("game.sh", "exit 3\n");

        let process = fx.supervisor.launch(&content, LaunchMode::Netplay).unwrap();
        assert_eq!(process.mode, LaunchMode::Netplay);
        assert_eq!(process.entry, content);
        let pid = process.pid;
        assert!(fx.supervisor.is_live());

        assert_eq!(
            fx.wait_for_event(),
            ProcessEvent::Exited { pid, code: Some(3) }
        );
        assert!(!fx.supervisor.is_live());
    }

    #[cfg(unix)]
    #[test]
    fn test_check_is_interval_gated() {
        let mut fx = Fixture::new();
        fx.install_shell(LaunchMode::Normal);
        let content = fx.content("game.sh", "exit 0\n");

        fx.supervisor.launch(&content, LaunchMode::Normal).unwrap();
        std::thread::sleep(Duration::from_millis(300));

        // Exited already, but the interval since launch has not passed
        assert_eq!(fx.supervisor.check(Instant::now()), None);
        assert!(fx.supervisor.is_live());

        let later = Instant::now() + Duration::from_millis(2500);
        let mut event = fx.supervisor.check(later);
        if event.is_none() {
            event = Some(fx.wait_for_event());
        }
        assert!(matches!(event, Some(ProcessEvent::Exited { code: Some(0), .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_second_launch_while_running() {
        let mut fx = Fixture::new();
        fx.install_shell(LaunchMode::Normal);
        let content = fx.content("game.sh", "sleep 1\n");

        let pid = fx.supervisor.launch(&content, LaunchMode::Normal).unwrap().pid;
        let err = fx.supervisor.launch(&content, LaunchMode::Normal).unwrap_err();
        assert!(matches!(err, LaunchError::AlreadyRunning { pid: p } if p == pid));

        fx.wait_for_event();
        assert!(fx.supervisor.launch(&content, LaunchMode::Normal).is_ok());
        fx.wait_for_event();
    }
}
