//! Worker launchers
//!
//! A launcher starts the compiler worker and hands back its stdout, where the
//! worker announces readiness. `ProcessLauncher` runs a real command; tests
//! substitute in-process workers.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tracing::{info, warn};

use crate::error::{CabooseError, CabooseResult};

/// Environment variable telling the worker which socket path to listen on
pub const SOCKET_ENV_VAR: &str = "CABOOSE_WORKER_SOCKET";

/// A freshly launched worker
pub struct LaunchedWorker {
    /// The worker's standard output
    pub stdout: Box<dyn Read + Send>,
    /// The OS process, if the worker is one
    pub child: Option<Child>,
}

pub trait WorkerLauncher: Send + Sync {
    fn launch(&self) -> CabooseResult<LaunchedWorker>;

    /// Human-readable description for logs and errors
    fn describe(&self) -> String;
}

/// Spawns the configured worker command.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    command: Vec<String>,
    socket: PathBuf,
    pid_file: PathBuf,
    current_dir: Option<PathBuf>,
}

impl ProcessLauncher {
    pub fn new(command: Vec<String>, socket: impl Into<PathBuf>, pid_file: impl Into<PathBuf>) -> Self {
        Self {
            command,
            socket: socket.into(),
            pid_file: pid_file.into(),
            current_dir: None,
        }
    }

    /// Directory the worker runs in (relative script paths resolve from here)
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    fn start_error(&self, source: std::io::Error) -> CabooseError {
        CabooseError::ProcessStart {
            command: self.describe(),
            source,
        }
    }
}

impl WorkerLauncher for ProcessLauncher {
    fn launch(&self) -> CabooseResult<LaunchedWorker> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            self.start_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "worker command is empty",
            ))
        })?;

        let mut command = Command::new(program);
        command
            .args(args)
            .env(SOCKET_ENV_VAR, &self.socket)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| self.start_error(e))?;
        let stdout = child.stdout.take().ok_or_else(|| {
            self.start_error(std::io::Error::other("worker stdout was not captured"))
        })?;

        // Teardown relies on this marker; a worker without one can still be used
        if let Err(e) = std::fs::write(&self.pid_file, child.id().to_string()) {
            warn!(
                pid_file = %self.pid_file.display(),
                error = %e,
                "could not record compiler worker pid"
            );
        }

        info!(pid = child.id(), command = %self.describe(), "launched compiler worker");

        Ok(LaunchedWorker {
            stdout: Box::new(stdout),
            child: Some(child),
        })
    }

    fn describe(&self) -> String {
        self.command.join(" ")
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use tempfile::tempdir;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn launch_records_pid_and_passes_socket() {
        let dir = tempdir().unwrap();
        let socket = dir.path().join("worker.sock");
        let pid_file = dir.path().join("worker.pid");

        let launcher = ProcessLauncher::new(
            sh("echo \"$CABOOSE_WORKER_SOCKET\"; echo '<<ready'; exec sleep 5"),
            &socket,
            &pid_file,
        );
        let launched = launcher.launch().unwrap();
        let mut child = launched.child.expect("process launcher returns a child");

        let mut lines = BufReader::new(launched.stdout).lines();
        assert_eq!(lines.next().unwrap().unwrap(), socket.display().to_string());
        assert_eq!(lines.next().unwrap().unwrap(), "<<ready");

        let recorded = std::fs::read_to_string(&pid_file).unwrap();
        assert_eq!(recorded, child.id().to_string());

        child.kill().unwrap();
        child.wait().unwrap();
    }

    #[test]
    fn launch_runs_in_current_dir() {
        let dir = tempdir().unwrap();
        let launcher = ProcessLauncher::new(
            sh("pwd"),
            dir.path().join("worker.sock"),
            dir.path().join("worker.pid"),
        )
        .with_current_dir(dir.path());

        let launched = launcher.launch().unwrap();
        let mut out = String::new();
        BufReader::new(launched.stdout).read_line(&mut out).unwrap();
        launched.child.unwrap().wait().unwrap();

        assert_eq!(
            std::fs::canonicalize(out.trim()).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
    }

    #[test]
    fn empty_command_is_a_start_error() {
        let launcher = ProcessLauncher::new(Vec::new(), "/tmp/none.sock", "/tmp/none.pid");
        assert!(matches!(
            launcher.launch(),
            Err(CabooseError::ProcessStart { .. })
        ));
    }

    #[test]
    fn missing_program_is_a_start_error() {
        let dir = tempdir().unwrap();
        let launcher = ProcessLauncher::new(
            vec!["caboose-no-such-worker-binary".to_string()],
            dir.path().join("worker.sock"),
            dir.path().join("worker.pid"),
        );

        let err = match launcher.launch() {
            Err(e) => e,
            Ok(_) => panic!("launch should fail"),
        };
        assert!(err.to_string().contains("caboose-no-such-worker-binary"));
        assert!(!dir.path().join("worker.pid").exists());
    }
}
