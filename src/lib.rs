//! Caboose - asset dependency resolver and bundler
//!
//! Caboose expands `require` directives in script and stylesheet sources into
//! single bundled files. CoffeeScript, Sass and SCSS sources are compiled by
//! a long-lived external worker reached over a local socket.
//!
//! ```no_run
//! use caboose::{CompileBridge, Config, DependencyResolver, LocalFs};
//! use std::path::Path;
//!
//! # fn main() -> caboose::CabooseResult<()> {
//! let root = Path::new(".");
//! let (config, _warnings) = Config::load_or_default(root)?;
//! let fs = LocalFs::new();
//! let bridge = CompileBridge::from_config(&config, root);
//! let resolver = DependencyResolver::new(&fs, &bridge, config.assets_dir(root))
//!     .with_url_prefix(config.assets.url_prefix.clone());
//! let js = resolver.resolve("/assets/js/app.js", config.resolve_mode())?;
//! # let _ = js;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod models;

// Re-exports for convenience
pub use config::{Config, Verbosity};
pub use domain::ports::{Compiler, FileSystem};
pub use domain::services::{DependencyResolver, ResolutionContext, ResolveMode};
pub use error::{CabooseError, CabooseResult};
pub use infrastructure::{teardown_worker, CompileBridge, LocalFs};
pub use models::{AssetKind, AssetPath, SourceFormat};
