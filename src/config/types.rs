//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::services::ResolveMode;
use crate::error::CabooseResult;

use super::loader::{self, ConfigWarning};

/// Asset tree configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Assets directory, relative to the project root
    #[serde(default = "default_assets_root")]
    pub root: PathBuf,

    /// URL prefix stripped from entry paths
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Output directory for `caboose bundle`
    #[serde(default = "default_public")]
    pub public: PathBuf,

    /// Expand requires (true) or serve sources as-is (false)
    #[serde(default)]
    pub bundle: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
            url_prefix: default_url_prefix(),
            public: default_public(),
            bundle: false,
        }
    }
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_url_prefix() -> String {
    "/assets/".to_string()
}

fn default_public() -> PathBuf {
    PathBuf::from("static")
}

/// Sass compiler flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SassConfig {
    #[serde(default)]
    pub line_numbers: bool,

    #[serde(default)]
    pub debug_info: bool,
}

impl SassConfig {
    /// Option string sent with every compile request.
    ///
    /// `line_numbers` wins when both flags are set.
    pub fn compiler_option(&self) -> &'static str {
        if self.line_numbers {
            "line_numbers"
        } else if self.debug_info {
            "debug_info"
        } else {
            ""
        }
    }
}

/// Compiler worker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Program and arguments
    #[serde(default = "default_worker_command")]
    pub command: Vec<String>,

    #[serde(default = "default_worker_socket")]
    pub socket: PathBuf,

    #[serde(default = "default_ready_marker")]
    pub ready_marker: String,

    #[serde(default = "default_pid_file")]
    pub pid_file: PathBuf,

    /// Bounded wait in milliseconds; absent or 0 blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command: default_worker_command(),
            socket: default_worker_socket(),
            ready_marker: default_ready_marker(),
            pid_file: default_pid_file(),
            timeout_ms: None,
        }
    }
}

impl WorkerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Pid marker location; relative paths resolve against `project_root`.
    pub fn pid_file_path(&self, project_root: &Path) -> PathBuf {
        if self.pid_file.is_absolute() {
            self.pid_file.clone()
        } else {
            project_root.join(&self.pid_file)
        }
    }
}

fn default_worker_command() -> Vec<String> {
    vec!["caboose-worker".to_string()]
}

fn default_worker_socket() -> PathBuf {
    PathBuf::from("/tmp/caboose.compiler.socket")
}

fn default_ready_marker() -> String {
    "<<ready".to_string()
}

fn default_pid_file() -> PathBuf {
    std::env::temp_dir().join("caboose.compiler.pid")
}

/// Output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Parse an env/CLI value; unknown values fall back to `Normal`
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }

    /// `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub sass: SassConfig,

    #[serde(default)]
    pub worker: WorkerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CabooseResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CabooseResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `caboose.toml` from the project root, or defaults
    pub fn load_or_default(project_root: &Path) -> CabooseResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (CABOOSE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Absolute assets directory
    pub fn assets_dir(&self, project_root: &Path) -> PathBuf {
        if self.assets.root.is_absolute() {
            self.assets.root.clone()
        } else {
            project_root.join(&self.assets.root)
        }
    }

    /// Absolute bundle output directory
    pub fn public_dir(&self, project_root: &Path) -> PathBuf {
        if self.assets.public.is_absolute() {
            self.assets.public.clone()
        } else {
            project_root.join(&self.assets.public)
        }
    }

    pub fn resolve_mode(&self) -> ResolveMode {
        ResolveMode::from_bundle_flag(self.assets.bundle)
    }
}
