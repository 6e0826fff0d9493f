//! Caboose CLI - asset dependency resolver and bundler
//!
//! Usage: caboose [COMMAND]
//!
//! Commands:
//!   resolve   Resolve one entry and print it
//!   compile   Compile a CoffeeScript/Sass/SCSS file
//!   bundle    Resolve every asset into the public directory (default)
//!   diagnose  Kill a stale worker and smoke-test the compiler
//!   version   Show version information

mod cli;
mod commands;
mod logging;
mod ui;

use anyhow::Result;
use clap::Parser;

use caboose::Verbosity;

use cli::{Cli, Commands};
use commands::ProjectContext;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        if json {
            let _ = ui::json::emit(serde_json::json!({
                "event": "error",
                "message": err.to_string(),
            }));
        } else {
            eprint!("{}", ui::error::format_error(&err));
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Bundle {
        source: None,
        out: None,
    });

    if let Commands::Version = command {
        logging::init(cli.verbose, Verbosity::default());
        return commands::version::cmd_version(cli.json);
    }

    let ctx = ProjectContext::load(cli.root, cli.config, cli.json)?;
    logging::init(cli.verbose, ctx.config.output.verbosity);

    match command {
        Commands::Resolve {
            entry,
            bundle,
            pass_through,
        } => commands::resolve::cmd_resolve(&ctx, &entry, bundle, pass_through, cli.json),
        Commands::Compile { file } => commands::compile::cmd_compile(&ctx, &file, cli.json),
        Commands::Bundle { source, out } => commands::bundle::cmd_bundle(&ctx, source, out, cli.json),
        Commands::Diagnose => commands::diagnose::cmd_diagnose(&ctx, cli.json),
        Commands::Version => commands::version::cmd_version(cli.json),
    }
}
