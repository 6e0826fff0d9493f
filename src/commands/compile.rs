use std::path::Path;

use anyhow::Result;

use super::ProjectContext;

pub fn cmd_compile(ctx: &ProjectContext, file: &Path, json: bool) -> Result<()> {
    let bridge = ctx.bridge();
    let output = bridge.compile_file(file)?;

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "compile",
            "file": file.display().to_string(),
            "content": output,
        }))?;
    } else {
        print!("{}", output);
    }
    Ok(())
}
