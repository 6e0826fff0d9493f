//! Diagnose Use Case
//!
//! Clears a worker left over from an earlier run, then round-trips a small
//! sample of every foreign format through the compiler.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::ports::Compiler;
use crate::error::CabooseResult;
use crate::infrastructure::teardown_worker;
use crate::models::SourceFormat;

/// Outcome of compiling one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatCheck {
    pub format: SourceFormat,
    pub passed: bool,
    /// Compiled output on success, error text otherwise
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnoseReport {
    /// Whether a stale worker was found and killed
    pub stale_worker_killed: bool,
    pub checks: Vec<FormatCheck>,
}

impl DiagnoseReport {
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Minimal valid source for a foreign format
pub fn sample_source(format: SourceFormat) -> &'static str {
    match format {
        SourceFormat::Coffee => "square = (x) -> x * x\n",
        SourceFormat::Sass => "h1\n  color: green\n",
        SourceFormat::Scss => "h1 { color: green; }\n",
        SourceFormat::Js => "var ok = true;\n",
        SourceFormat::Css => "h1 { color: green; }\n",
    }
}

/// Tear down the worker recorded in `pid_file`, then check every foreign format.
///
/// Only the teardown can fail the run; compile failures land in the report.
pub fn diagnose(compiler: &dyn Compiler, pid_file: &Path) -> CabooseResult<DiagnoseReport> {
    let stale_worker_killed = teardown_worker(pid_file)?;
    if stale_worker_killed {
        info!(pid_file = %pid_file.display(), "removed stale compiler worker");
    }

    let checks = SourceFormat::FOREIGN
        .iter()
        .map(|&format| match compiler.compile(format, sample_source(format)) {
            Ok(output) => FormatCheck {
                format,
                passed: true,
                detail: output,
            },
            Err(e) => FormatCheck {
                format,
                passed: false,
                detail: e.to_string(),
            },
        })
        .collect();

    Ok(DiagnoseReport {
        stale_worker_killed,
        checks,
    })
}
