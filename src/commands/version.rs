use anyhow::Result;

use caboose::SourceFormat;

pub fn cmd_version(json: bool) -> Result<()> {
    if json {
        let formats: Vec<_> = SourceFormat::ALL
            .iter()
            .map(|f| {
                serde_json::json!({
                    "format": f,
                    "kind": f.kind(),
                    "compiled": f.is_foreign(),
                })
            })
            .collect();

        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "version",
            "data": {
                "caboose": env!("CARGO_PKG_VERSION"),
                "formats": formats,
            }
        }))?;
    } else {
        println!("Caboose v{}", env!("CARGO_PKG_VERSION"));
        println!("\nFormats:");
        for format in SourceFormat::ALL {
            let handling = if format.is_foreign() {
                format!("compiled to .{}", format.output_format())
            } else {
                "native".to_string()
            };
            println!("  - .{:<7} {}", format.extension(), handling);
        }
    }
    Ok(())
}
