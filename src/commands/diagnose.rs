use anyhow::{bail, Result};

use caboose::application::diagnose;

use super::ProjectContext;

pub fn cmd_diagnose(ctx: &ProjectContext, json: bool) -> Result<()> {
    let bridge = ctx.bridge();
    let pid_file = ctx.config.worker.pid_file_path(&ctx.root);

    if !json {
        println!("🩺 Caboose Diagnose");
        println!("Worker: {}", ctx.config.worker.command.join(" "));
        println!("Socket: {}", bridge.settings().socket.display());
    }

    let report = diagnose(&bridge, &pid_file)?;

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "diagnose",
            "data": report,
        }))?;
    } else {
        if report.stale_worker_killed {
            println!("\n✓ Stopped stale worker from {}", pid_file.display());
        }
        println!();
        for check in &report.checks {
            if check.passed {
                println!("✓ {}", check.format);
            } else {
                println!("✗ {}: {}", check.format, check.detail);
            }
        }
    }

    if !report.is_healthy() {
        bail!("compiler worker failed for some formats");
    }
    Ok(())
}
