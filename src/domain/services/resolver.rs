//! Dependency resolver
//!
//! Expands an entry asset's `require` graph into an ordered, deduplicated
//! list of bodies and joins them.
//!
//! Traversal is depth-first: every required asset is fully resolved before
//! the requiring asset's own body is appended. An asset already visited in
//! the current resolution contributes an empty body instead of being expanded
//! again, which is also what stops circular requires from looping.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::domain::ports::{Compiler, FileSystem, FsError};
use crate::domain::services::{bundler, directive_scanner};
use crate::error::{CabooseError, CabooseResult};
use crate::models::{AssetPath, SourceFormat};

/// How `require` directives are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Expand requires recursively; only resolved content is emitted
    Bundle,
    /// Return the entry verbatim (compiled if foreign), directives included,
    /// for client-side loaders that fetch each file separately
    #[default]
    PassThrough,
}

impl ResolveMode {
    pub fn from_bundle_flag(bundle: bool) -> Self {
        if bundle {
            ResolveMode::Bundle
        } else {
            ResolveMode::PassThrough
        }
    }
}

/// Per-request resolution state. Never shared between requests.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    visited: HashSet<String>,
    bodies: Vec<String>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a source file visited; returns `false` if it already was.
    fn mark_visited(&mut self, source: &AssetPath) -> bool {
        self.visited.insert(source.relative().to_string())
    }

    fn push(&mut self, body: String) {
        self.bodies.push(body);
    }

    /// Bodies accumulated so far, in resolution order
    pub fn bodies(&self) -> &[String] {
        &self.bodies
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// Resolves entry assets under an assets root.
///
/// Holds only shared, read-only collaborators, so one resolver can serve many
/// concurrent requests.
pub struct DependencyResolver<'a> {
    fs: &'a dyn FileSystem,
    compiler: &'a dyn Compiler,
    root: PathBuf,
    url_prefix: String,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, compiler: &'a dyn Compiler, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            compiler,
            root: root.into(),
            url_prefix: "/assets/".to_string(),
        }
    }

    /// URL prefix stripped from entry paths (default `/assets/`)
    pub fn with_url_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = url_prefix.into();
        self
    }

    /// Resolve an entry given as a URL (`/assets/js/app.js`) or root-relative path.
    pub fn resolve(&self, entry: &str, mode: ResolveMode) -> CabooseResult<String> {
        let path = AssetPath::parse(entry, &self.url_prefix)?;
        self.resolve_path(&path, mode)
    }

    pub fn resolve_path(&self, entry: &AssetPath, mode: ResolveMode) -> CabooseResult<String> {
        let mut ctx = ResolutionContext::new();
        self.resolve_into(entry, mode, &mut ctx)?;
        Ok(bundler::join(entry.kind(), ctx.bodies()))
    }

    /// Resolve into a caller-owned context, leaving the bodies unjoined.
    pub fn resolve_into(
        &self,
        entry: &AssetPath,
        mode: ResolveMode,
        ctx: &mut ResolutionContext,
    ) -> CabooseResult<()> {
        match mode {
            ResolveMode::Bundle => self.visit(entry, entry, ctx),
            ResolveMode::PassThrough => self.pass_through(entry, ctx),
        }
    }

    /// Find the source file backing `path`.
    ///
    /// A `.js` request may be served by a `.coffee` file and a `.css` request by
    /// `.sass` or `.scss`; the first existing candidate wins.
    pub fn locate(&self, path: &AssetPath) -> Option<AssetPath> {
        if escapes_root(path.relative()) {
            return None;
        }

        path.format()
            .source_candidates()
            .iter()
            .map(|&format| {
                if format == path.format() {
                    path.clone()
                } else {
                    path.with_source_format(format)
                }
            })
            .find(|candidate| self.fs.exists(&self.source_file(candidate)))
    }

    /// Absolute location of an asset's source file
    pub fn source_file(&self, path: &AssetPath) -> PathBuf {
        self.root.join(path.relative())
    }

    fn visit(
        &self,
        path: &AssetPath,
        entry: &AssetPath,
        ctx: &mut ResolutionContext,
    ) -> CabooseResult<()> {
        if path.kind() != entry.kind() {
            return Err(CabooseError::UnsupportedAsset {
                path: path.display().to_string(),
            });
        }

        let source = self.locate(path).ok_or_else(|| not_found(path))?;

        if !ctx.mark_visited(&source) {
            trace!(asset = %source.relative(), "already included, skipping");
            ctx.push(String::new());
            return Ok(());
        }

        let raw = self.read(&source)?;

        for child in directive_scanner::extract_requires(&source, &raw) {
            self.visit(&child, entry, ctx)
                .map_err(|e| e.required_by(path.display()))?;
        }

        let own = self.own_body(&source, &raw)?;
        ctx.push(own);
        Ok(())
    }

    fn pass_through(&self, path: &AssetPath, ctx: &mut ResolutionContext) -> CabooseResult<()> {
        let source = self.locate(path).ok_or_else(|| not_found(path))?;
        ctx.mark_visited(&source);

        let raw = self.read(&source)?;
        let body = if source.format().is_foreign() {
            self.compiler.compile(source.format(), &raw)?
        } else {
            raw
        };

        ctx.push(body);
        Ok(())
    }

    /// The asset's own contribution in bundle mode.
    ///
    /// Sass sources go to the compiler untouched, directive lines included;
    /// every other format has its directives stripped first.
    fn own_body(&self, source: &AssetPath, raw: &str) -> CabooseResult<String> {
        match source.format() {
            SourceFormat::Sass => self.compiler.compile(SourceFormat::Sass, raw),
            format if format.is_foreign() => self
                .compiler
                .compile(format, &directive_scanner::strip_directives(format, raw)),
            format => Ok(directive_scanner::strip_directives(format, raw)),
        }
    }

    fn read(&self, source: &AssetPath) -> CabooseResult<String> {
        self.fs
            .read(&self.source_file(source))
            .map_err(|e| match e {
                FsError::NotFound(_) => not_found(source),
                other => other.into(),
            })
    }
}

fn not_found(path: &AssetPath) -> CabooseError {
    CabooseError::AssetNotFound {
        path: path.display().to_string(),
    }
}

fn escapes_root(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}
