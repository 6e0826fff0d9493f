use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Caboose - asset dependency resolver and bundler
#[derive(Parser, Debug)]
#[command(name = "caboose")]
#[command(version, about, long_about = None)]
#[command(after_help = "Run 'caboose' without a command to bundle the assets directory.")]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/caboose.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one entry and print the result
    Resolve {
        /// Entry path, e.g. /assets/js/app.js or js/app.js
        entry: String,

        /// Expand requires into one bundle
        #[arg(long, conflicts_with = "pass_through")]
        bundle: bool,

        /// Return the entry as-is (compiled if needed), directives included
        #[arg(long)]
        pass_through: bool,
    },

    /// Compile a CoffeeScript, Sass or SCSS file and print the output
    Compile {
        /// Source file
        file: PathBuf,
    },

    /// Resolve every asset into the public directory (default)
    Bundle {
        /// Assets directory (defaults to assets.root)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output directory (defaults to assets.public)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Kill a stale compiler worker and smoke-test every foreign format
    Diagnose,

    /// Show version information
    Version,
}
