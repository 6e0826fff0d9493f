//! Bundle result types

use std::path::PathBuf;

use serde::Serialize;

/// An entry that could not be resolved or written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleFailure {
    /// Entry as requested, e.g. `/assets/js/app.js`
    pub entry: String,
    /// Full error text, including any `required by` chain
    pub message: String,
}

/// Result of a bundle run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BundleResult {
    /// Resolved entries written
    pub written: Vec<PathBuf>,
    /// Non-asset files copied as-is
    pub copied: Vec<PathBuf>,
    pub failed: Vec<BundleFailure>,
}

impl BundleResult {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.copied.len() + self.failed.len()
    }
}
