//! Configuration module for Caboose
//!
//! Priority, highest first:
//! 1. CLI flags
//! 2. Environment variables (CABOOSE_*)
//! 3. Project config (`caboose.toml` in the project root)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{ConfigWarning, CONFIG_FILE_NAME};
pub use types::{AssetsConfig, Config, OutputConfig, SassConfig, Verbosity, WorkerConfig};
