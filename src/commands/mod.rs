//! Command handlers for the caboose binary

pub mod bundle;
pub mod compile;
pub mod diagnose;
pub mod resolve;
pub mod version;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use caboose::config::{Config, CONFIG_FILE_NAME};
use caboose::CompileBridge;

use crate::ui::output::print_config_warnings;

/// Project root plus its effective configuration
pub struct ProjectContext {
    pub root: PathBuf,
    pub config: Config,
}

impl ProjectContext {
    /// Load config from `--config`, or `caboose.toml` in the root, or defaults.
    ///
    /// Unknown keys are reported on stderr unless `json` is set.
    pub fn load(root: Option<PathBuf>, config_path: Option<PathBuf>, json: bool) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("reading current directory")?,
        };

        let (config, warnings, path) = match config_path {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                let (config, warnings) = Config::load_with_warnings(&path)?;
                (config.with_env_overrides(), warnings, path)
            }
            None => {
                let (config, warnings) = Config::load_or_default(&root)?;
                (config, warnings, root.join(CONFIG_FILE_NAME))
            }
        };

        if !json {
            print_config_warnings(&path, &warnings);
        }

        Ok(Self { root, config })
    }

    /// Bridge to the configured compiler worker; nothing starts until first use
    pub fn bridge(&self) -> CompileBridge {
        CompileBridge::from_config(&self.config, &self.root)
    }
}
