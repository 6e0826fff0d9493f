//! Explicit worker cleanup
//!
//! Kills the worker recorded in the pid marker. This never runs on normal
//! exit; it is invoked by `caboose diagnose` or by hand.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{CabooseError, CabooseResult};

/// Kill the worker whose pid is recorded in `pid_file`.
///
/// The marker is removed before the signal is sent. Returns `Ok(false)` when
/// there is no marker or the recorded process is already gone.
pub fn teardown_worker(pid_file: &Path) -> CabooseResult<bool> {
    let content = match std::fs::read_to_string(pid_file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(pid_file = %pid_file.display(), "no worker pid marker");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    std::fs::remove_file(pid_file)?;

    let pid: u32 = content
        .trim()
        .parse()
        .ok()
        .filter(|pid| *pid > 0)
        .ok_or_else(|| CabooseError::InvalidPidFile {
            path: pid_file.to_path_buf(),
            content: content.clone(),
        })?;

    let killed = kill_process(pid)?;
    if killed {
        info!(pid, "killed compiler worker");
    } else {
        debug!(pid, "compiler worker was not running");
    }
    Ok(killed)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> CabooseResult<bool> {
    let pid = libc::pid_t::try_from(pid).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, "pid out of range")
    })?;

    // SAFETY: kill(2) has no memory-safety preconditions
    let rc = unsafe { libc::kill(pid, libc::SIGKILL) };
    if rc == 0 {
        return Ok(true);
    }

    let err = std::io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        Ok(false)
    } else {
        Err(err.into())
    }
}

#[cfg(not(unix))]
fn kill_process(_pid: u32) -> CabooseResult<bool> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "killing the compiler worker requires a unix platform",
    )
    .into())
}
