//! One request/response exchange over the worker's local socket.
//!
//! Every call opens a fresh connection; nothing is pooled.

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::error::{CabooseError, CabooseResult};

#[cfg(unix)]
pub(crate) fn exchange(socket: &Path, request: &[u8], timeout: Option<Duration>) -> CabooseResult<String> {
    use std::io::{Read, Write};
    use std::net::Shutdown;
    use std::os::unix::net::UnixStream;

    let mut stream = UnixStream::connect(socket).map_err(|source| CabooseError::WorkerUnavailable {
        socket: socket.to_path_buf(),
        source,
    })?;
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    stream.write_all(request).map_err(timeout_or_io)?;
    // The worker may already have closed its end after reading the frame
    let _ = stream.shutdown(Shutdown::Write);

    let mut response = Vec::new();
    stream.read_to_end(&mut response).map_err(timeout_or_io)?;
    Ok(String::from_utf8_lossy(&response).into_owned())
}

#[cfg(not(unix))]
pub(crate) fn exchange(socket: &Path, _request: &[u8], _timeout: Option<Duration>) -> CabooseResult<String> {
    Err(CabooseError::WorkerUnavailable {
        socket: socket.to_path_buf(),
        source: io::Error::new(io::ErrorKind::Unsupported, "local sockets require a unix platform"),
    })
}

#[cfg_attr(not(unix), allow(dead_code))]
fn timeout_or_io(err: io::Error) -> CabooseError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => CabooseError::Timeout {
            what: "compiler response".to_string(),
        },
        _ => CabooseError::Io(err),
    }
}
