//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CabooseError, CabooseResult};

use super::types::{Config, Verbosity};

/// Project config file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "caboose.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CabooseResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CabooseError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `caboose.toml` from the project root, falling back to defaults.
///
/// A missing file is not an error; a malformed one is. Environment overrides
/// are applied either way.
pub fn load_or_default(project_root: &Path) -> CabooseResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(CONFIG_FILE_NAME);
    let (config, warnings) = if project_config.is_file() {
        load_with_warnings(&project_config)?
    } else {
        (Config::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (CABOOSE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(super) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // CABOOSE_ASSETS_ROOT
    if let Some(root) = var("CABOOSE_ASSETS_ROOT") {
        if !root.trim().is_empty() {
            config.assets.root = PathBuf::from(root);
        }
    }

    // CABOOSE_BUNDLE
    if let Some(val) = var("CABOOSE_BUNDLE") {
        config.assets.bundle = matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
    }

    // CABOOSE_WORKER_SOCKET
    if let Some(socket) = var("CABOOSE_WORKER_SOCKET") {
        if !socket.trim().is_empty() {
            config.worker.socket = PathBuf::from(socket);
        }
    }

    // CABOOSE_VERBOSITY
    if let Some(verbosity) = var("CABOOSE_VERBOSITY") {
        config.output.verbosity = Verbosity::parse_lossy(&verbosity);
    }

    config
}

pub(super) fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "assets",
        "root",
        "url_prefix",
        "public",
        "bundle",
        "sass",
        "line_numbers",
        "debug_info",
        "worker",
        "command",
        "socket",
        "ready_marker",
        "pid_file",
        "timeout_ms",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
