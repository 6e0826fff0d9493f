//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system implementation
//! - `worker/` - Compiler worker process, socket protocol and teardown

pub mod fs;
pub mod worker;

// Re-export for convenience
pub use fs::LocalFs;
pub use worker::{teardown_worker, CompileBridge, ProcessLauncher, WorkerLauncher, WorkerSettings};
