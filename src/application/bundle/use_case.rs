//! Bundle Use Case
//!
//! Plans the output tree from the assets directory, then resolves every entry
//! in parallel. All entries share one compiler, so a foreign-format tree
//! starts the worker at most once.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::ports::{Compiler, FileSystem};
use crate::domain::services::DependencyResolver;
use crate::error::{CabooseError, CabooseResult};
use crate::models::SourceFormat;

use super::options::BundleOptions;
use super::result::{BundleFailure, BundleResult};

/// One resolved output to produce
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedEntry {
    url: String,
    target: PathBuf,
}

#[derive(Debug, Default)]
struct BundlePlan {
    entries: Vec<PlannedEntry>,
    copies: Vec<(PathBuf, PathBuf)>,
}

/// Bundle use case - resolves an assets tree into a servable directory
pub struct BundleUseCase<FS, C>
where
    FS: FileSystem,
    C: Compiler,
{
    fs: FS,
    compiler: C,
}

impl<FS, C> BundleUseCase<FS, C>
where
    FS: FileSystem,
    C: Compiler,
{
    pub fn new(fs: FS, compiler: C) -> Self {
        Self { fs, compiler }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Run the bundle.
    ///
    /// Per-entry failures are collected in the result; only a failure to walk
    /// the source tree aborts the run.
    pub fn execute(&self, options: &BundleOptions) -> CabooseResult<BundleResult> {
        let plan = plan(options)?;
        info!(
            entries = plan.entries.len(),
            copies = plan.copies.len(),
            source = %options.source.display(),
            "bundling assets"
        );

        let mut result = BundleResult::default();

        for (from, to) in &plan.copies {
            match self.fs.copy(from, to) {
                Ok(()) => result.copied.push(to.clone()),
                Err(e) => result.failed.push(BundleFailure {
                    entry: from.display().to_string(),
                    message: e.to_string(),
                }),
            }
        }

        let resolver = DependencyResolver::new(&self.fs, &self.compiler, &options.source)
            .with_url_prefix(options.url_prefix.clone());

        let outcomes: Vec<(PlannedEntry, CabooseResult<()>)> = plan
            .entries
            .into_par_iter()
            .map(|entry| {
                let outcome = resolver
                    .resolve(&entry.url, options.mode)
                    .and_then(|body| self.fs.write(&entry.target, &body).map_err(CabooseError::from));
                (entry, outcome)
            })
            .collect();

        for (entry, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    debug!(entry = %entry.url, target = %entry.target.display(), "wrote bundle");
                    result.written.push(entry.target);
                }
                Err(e) => result.failed.push(BundleFailure {
                    entry: entry.url,
                    message: e.to_string(),
                }),
            }
        }

        Ok(result)
    }
}

/// Walk the source tree and decide what each file becomes.
///
/// Sources sharing an output name (`app.js` next to `app.coffee`) produce a
/// single entry; the resolver picks the backing file.
fn plan(options: &BundleOptions) -> CabooseResult<BundlePlan> {
    if !options.source.is_dir() {
        return Err(CabooseError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("assets directory not found: {}", options.source.display()),
        )));
    }

    let target_dir = options.target_dir();
    let mut entries = BTreeMap::new();
    let mut copies = Vec::new();

    let walker = WalkBuilder::new(&options.source)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for dent in walker {
        let dent = dent.map_err(|e| CabooseError::Io(std::io::Error::other(e.to_string())))?;
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = dent.path();
        let Ok(relative) = path.strip_prefix(&options.source) else {
            continue;
        };

        match SourceFormat::from_path(relative) {
            Some(format) => {
                let output = relative.with_extension(format.output_format().extension());
                let url = format!(
                    "{}/{}",
                    options.url_prefix.trim_end_matches('/'),
                    to_url_path(&output)
                );
                entries.entry(url.clone()).or_insert_with(|| PlannedEntry {
                    url,
                    target: target_dir.join(&output),
                });
            }
            None => copies.push((path.to_path_buf(), target_dir.join(relative))),
        }
    }

    Ok(BundlePlan {
        entries: entries.into_values().collect(),
        copies,
    })
}

fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
