use std::path::PathBuf;

use anyhow::{bail, Result};

use caboose::application::{BundleOptions, BundleUseCase};
use caboose::LocalFs;

use super::ProjectContext;

pub fn cmd_bundle(ctx: &ProjectContext, source: Option<PathBuf>, out: Option<PathBuf>, json: bool) -> Result<()> {
    let source = source.unwrap_or_else(|| ctx.config.assets_dir(&ctx.root));
    let out = out.unwrap_or_else(|| ctx.config.public_dir(&ctx.root));
    // `assets.bundle` only applies to `resolve`; bundle output is always expanded
    let options =
        BundleOptions::new(&source, &out).with_url_prefix(ctx.config.assets.url_prefix.clone());

    if !json {
        println!("📦 Caboose Bundle");
        println!("Source: {}", source.display());
        println!("Output: {}", options.target_dir().display());
    }

    let use_case = BundleUseCase::new(LocalFs::new(), ctx.bridge());
    let result = use_case.execute(&options)?;

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "bundle",
            "data": result,
        }))?;
    } else {
        println!(
            "\n✓ Bundled {} entries, copied {} files",
            result.written.len(),
            result.copied.len()
        );
        for failure in &result.failed {
            eprintln!("\n✗ {}\n{}", failure.entry, failure.message);
        }
    }

    if !result.is_success() {
        bail!("{} asset(s) failed to bundle", result.failed.len());
    }
    Ok(())
}
