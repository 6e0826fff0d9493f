//! Error types for Caboose
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.
//!
//! Resolution failures are chained textually: every asset that required a
//! failing asset appends one `--- required by <path>` line to the message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for Caboose operations
pub type CabooseResult<T> = Result<T, CabooseError>;

/// Main error type for Caboose operations
#[derive(Error, Debug)]
pub enum CabooseError {
    /// Entry extension is not one of the supported source formats
    #[error("Unsupported Asset: {path}")]
    UnsupportedAsset { path: String },

    /// No backing source file for an entry or required asset
    #[error("Asset Not Found: {path}")]
    AssetNotFound { path: String },

    /// A required asset failed; `path` is the asset that required it
    #[error("{inner}\n--- required by {path}")]
    RequiredBy {
        inner: Box<CabooseError>,
        path: String,
    },

    /// The compiler worker answered with an error status
    #[error("Could not compile {format}: {message}")]
    Compile { format: String, message: String },

    /// `compile_file` called on something the worker cannot compile
    #[error("Unsupported format ({}). Valid formats are: coffee, sass, scss.", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The worker process could not be launched or died before it was ready
    #[error("failed to start compiler worker `{command}`: {source}")]
    ProcessStart {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Connecting to the worker socket failed
    #[error("compiler worker unavailable at {}: {source}", socket.display())]
    WorkerUnavailable {
        socket: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The worker reply did not contain a status delimiter
    #[error("malformed compiler response: {response:?}")]
    MalformedResponse { response: String },

    /// A configured bounded wait expired
    #[error("timed out waiting for {what}")]
    Timeout { what: String },

    /// The process-id marker did not contain a pid
    #[error("invalid pid marker {}: {content:?}", path.display())]
    InvalidPidFile { path: PathBuf, content: String },

    /// Config file could not be parsed
    #[error("invalid config in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CabooseError {
    /// Wrap this error in a `required by` frame naming the requiring asset.
    pub fn required_by(self, path: impl Into<String>) -> Self {
        CabooseError::RequiredBy {
            inner: Box::new(self),
            path: path.into(),
        }
    }

    /// The deepest error of a `required by` chain.
    pub fn root_cause(&self) -> &CabooseError {
        match self {
            CabooseError::RequiredBy { inner, .. } => inner.root_cause(),
            other => other,
        }
    }
}
