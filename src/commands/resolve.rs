use anyhow::Result;

use caboose::{DependencyResolver, LocalFs, ResolveMode};

use super::ProjectContext;

/// Pick the mode: explicit flags first, then `assets.bundle`
pub fn select_mode(bundle: bool, pass_through: bool, configured: ResolveMode) -> ResolveMode {
    if bundle {
        ResolveMode::Bundle
    } else if pass_through {
        ResolveMode::PassThrough
    } else {
        configured
    }
}

pub fn cmd_resolve(ctx: &ProjectContext, entry: &str, bundle: bool, pass_through: bool, json: bool) -> Result<()> {
    let mode = select_mode(bundle, pass_through, ctx.config.resolve_mode());
    let fs = LocalFs::new();
    let bridge = ctx.bridge();
    let resolver = DependencyResolver::new(&fs, &bridge, ctx.config.assets_dir(&ctx.root))
        .with_url_prefix(ctx.config.assets.url_prefix.clone());

    let output = resolver.resolve(entry, mode)?;

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "resolve",
            "entry": entry,
            "mode": match mode {
                ResolveMode::Bundle => "bundle",
                ResolveMode::PassThrough => "pass-through",
            },
            "content": output,
        }))?;
    } else {
        print!("{}", output);
    }
    Ok(())
}
