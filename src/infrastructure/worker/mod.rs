//! Compiler worker
//!
//! Foreign formats (coffee, sass, scss) are compiled by a long-lived external
//! process listening on a local socket. This module owns that process:
//!
//! - `launcher` - spawning the worker and recording its pid
//! - `bridge` - lazy one-time start, readiness handshake, compile calls
//! - `protocol` - the `<<`-delimited request/response text format
//! - `teardown` - killing a worker by its recorded pid

mod bridge;
mod launcher;
pub mod protocol;
mod teardown;
mod transport;

pub use bridge::{CompileBridge, WorkerSettings};
pub use launcher::{LaunchedWorker, ProcessLauncher, WorkerLauncher, SOCKET_ENV_VAR};
pub use protocol::{CompileReply, CompileRequest};
pub use teardown::teardown_worker;
