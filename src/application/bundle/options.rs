//! Bundle options

use std::path::PathBuf;

use crate::domain::services::ResolveMode;

/// Options for the bundle command
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Assets directory to read
    pub source: PathBuf,
    /// Output root; files land under `<out>/<url_prefix>`
    pub out: PathBuf,
    pub url_prefix: String,
    pub mode: ResolveMode,
}

impl BundleOptions {
    pub fn new(source: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            out: out.into(),
            url_prefix: "/assets/".to_string(),
            mode: ResolveMode::Bundle,
        }
    }

    pub fn with_url_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = url_prefix.into();
        self
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Directory the entries are written into
    pub fn target_dir(&self) -> PathBuf {
        let prefix = self.url_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.out.clone()
        } else {
            self.out.join(prefix)
        }
    }
}
