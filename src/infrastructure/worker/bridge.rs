//! Compile bridge
//!
//! Owns the compiler worker for the lifetime of the process. The worker is
//! launched on the first compile call; concurrent first callers wait for that
//! single launch instead of starting their own. Once ready, compile calls run
//! fully in parallel, one socket connection each.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::launcher::{ProcessLauncher, WorkerLauncher};
use super::protocol::{CompileReply, CompileRequest};
use super::transport;
use crate::config::Config;
use crate::domain::ports::Compiler;
use crate::error::{CabooseError, CabooseResult};
use crate::models::SourceFormat;

/// Runtime settings for talking to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSettings {
    pub socket: PathBuf,
    /// Substring the worker prints on stdout once it accepts connections
    pub ready_marker: String,
    /// Compiler option forwarded with every request
    pub option: String,
    /// Bound on readiness and on each socket exchange; `None` blocks
    pub timeout: Option<Duration>,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            socket: PathBuf::from("/tmp/caboose.compiler.socket"),
            ready_marker: "<<ready".to_string(),
            option: String::new(),
            timeout: None,
        }
    }
}

impl WorkerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            socket: config.worker.socket.clone(),
            ready_marker: config.worker.ready_marker.clone(),
            option: config.sass.compiler_option().to_string(),
            timeout: config.worker.timeout(),
        }
    }
}

enum WorkerState {
    NotStarted,
    Starting,
    Ready {
        // Held so the process handle outlives the launch; never waited on
        #[allow(dead_code)]
        child: Option<Child>,
    },
}

pub struct CompileBridge {
    settings: WorkerSettings,
    launcher: Box<dyn WorkerLauncher>,
    ready: AtomicBool,
    state: Mutex<WorkerState>,
    state_changed: Condvar,
}

impl CompileBridge {
    pub fn new(settings: WorkerSettings, launcher: Box<dyn WorkerLauncher>) -> Self {
        Self {
            settings,
            launcher,
            ready: AtomicBool::new(false),
            state: Mutex::new(WorkerState::NotStarted),
            state_changed: Condvar::new(),
        }
    }

    /// Bridge for the worker command configured in `caboose.toml`.
    ///
    /// Relative worker paths resolve against `project_root`.
    pub fn from_config(config: &Config, project_root: &Path) -> Self {
        let launcher = ProcessLauncher::new(
            config.worker.command.clone(),
            config.worker.socket.clone(),
            config.worker.pid_file_path(project_root),
        )
        .with_current_dir(project_root);
        Self::new(WorkerSettings::from_config(config), Box::new(launcher))
    }

    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Launch the worker unless it is already running, blocking until it
    /// reports readiness.
    ///
    /// A failed launch leaves the bridge not started, so a later call retries.
    pub fn ensure_started(&self) -> CabooseResult<()> {
        if self.is_ready() {
            return Ok(());
        }

        let mut state = self.lock_state();
        loop {
            let starting = match *state {
                WorkerState::Ready { .. } => return Ok(()),
                WorkerState::Starting => true,
                WorkerState::NotStarted => false,
            };
            if !starting {
                break;
            }
            state = self
                .state_changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *state = WorkerState::Starting;
        drop(state);

        let outcome = self.start_worker();

        let mut state = self.lock_state();
        let result = match outcome {
            Ok(child) => {
                *state = WorkerState::Ready { child };
                self.ready.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                *state = WorkerState::NotStarted;
                Err(e)
            }
        };
        drop(state);
        self.state_changed.notify_all();
        result
    }

    /// Compile a foreign-format file from disk.
    pub fn compile_file(&self, path: &Path) -> CabooseResult<String> {
        let format = SourceFormat::from_path(path)
            .filter(|f| f.is_foreign())
            .ok_or_else(|| CabooseError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let content = std::fs::read_to_string(path)?;
        self.compile(format, &content)
    }

    fn lock_state(&self) -> MutexGuard<'_, WorkerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_worker(&self) -> CabooseResult<Option<Child>> {
        let describe = self.launcher.describe();
        info!(command = %describe, "starting compiler worker");

        let launched = self.launcher.launch()?;
        let mut child = launched.child;

        let signal = match spawn_stdout_watcher(launched.stdout, self.settings.ready_marker.clone()) {
            Ok(signal) => signal,
            Err(source) => {
                kill(&mut child);
                return Err(CabooseError::ProcessStart {
                    command: describe,
                    source,
                });
            }
        };

        let outcome = match self.settings.timeout {
            Some(limit) => signal.recv_timeout(limit).map_err(|e| match e {
                RecvTimeoutError::Timeout => CabooseError::Timeout {
                    what: format!("compiler worker `{}` to become ready", describe),
                },
                RecvTimeoutError::Disconnected => exited_early(&describe),
            }),
            None => signal.recv().map_err(|_| exited_early(&describe)),
        }
        .and_then(|read| {
            read.map_err(|source| CabooseError::ProcessStart {
                command: describe.clone(),
                source,
            })
        });

        match outcome {
            Ok(()) => {
                info!(socket = %self.settings.socket.display(), "compiler worker ready");
                Ok(child)
            }
            Err(e) => {
                warn!(error = %e, "compiler worker did not become ready");
                kill(&mut child);
                Err(e)
            }
        }
    }
}

impl Compiler for CompileBridge {
    fn compile(&self, format: SourceFormat, content: &str) -> CabooseResult<String> {
        self.ensure_started()?;

        let request = CompileRequest::new(format, &self.settings.option, content);
        debug!(format = %format, bytes = content.len(), "compile request");

        let response = transport::exchange(&self.settings.socket, &request.encode(), self.settings.timeout)?;
        CompileReply::parse(&response)?.into_result(format)
    }
}

fn exited_early(command: &str) -> CabooseError {
    CabooseError::ProcessStart {
        command: command.to_string(),
        source: io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "worker output closed before it signalled readiness",
        ),
    }
}

fn kill(child: &mut Option<Child>) {
    if let Some(child) = child.as_mut() {
        let _ = child.kill();
        let _ = child.wait();
    }
}

/// Drain the worker's stdout on a background thread.
///
/// The receiver gets exactly one message: `Ok(())` when the marker shows up,
/// or the read error / EOF that ended the stream first. Output keeps being
/// drained afterwards so the worker never blocks on a full pipe.
fn spawn_stdout_watcher(
    stdout: Box<dyn Read + Send>,
    marker: String,
) -> io::Result<mpsc::Receiver<io::Result<()>>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("caboose-worker-stdout".to_string())
        .spawn(move || watch_stdout(stdout, marker.as_bytes(), tx))?;
    Ok(rx)
}

fn watch_stdout(mut stdout: Box<dyn Read + Send>, marker: &[u8], ready: mpsc::Sender<io::Result<()>>) {
    let mut signalled = false;
    let mut line = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        match stdout.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                line.extend_from_slice(&buf[..n]);
                if !signalled && contains(&line, marker) {
                    signalled = true;
                    let _ = ready.send(Ok(()));
                }
                while let Some(pos) = line.iter().position(|&b| b == b'\n') {
                    let rest = line.split_off(pos + 1);
                    log_line(&line);
                    line = rest;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                if !signalled {
                    let _ = ready.send(Err(e));
                }
                return;
            }
        }
    }

    if !line.is_empty() {
        log_line(&line);
    }
    if !signalled {
        let _ = ready.send(Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "worker output closed before it signalled readiness",
        )));
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn log_line(line: &[u8]) {
    let text = String::from_utf8_lossy(line);
    let text = text.trim_end();
    if !text.is_empty() {
        debug!(target: "caboose::worker", "{}", text);
    }
}
