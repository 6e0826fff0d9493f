//! Core data models for Caboose
//!
//! - `SourceFormat`: supported file extensions and how each is handled
//! - `AssetKind`: script or stylesheet
//! - `CompileClass`: native (included as-is) or foreign (needs the worker)
//! - `AssetPath`: a logical path under the assets root with its format

use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::{CabooseError, CabooseResult};

/// Kind of asset a bundle is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Stylesheet,
}

impl AssetKind {
    /// The native format bundles of this kind are served as
    pub fn native_format(self) -> SourceFormat {
        match self {
            AssetKind::Script => SourceFormat::Js,
            AssetKind::Stylesheet => SourceFormat::Css,
        }
    }
}

/// Whether a format needs the external compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileClass {
    Native,
    Foreign,
}

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Js,
    Coffee,
    Css,
    Sass,
    Scss,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 5] = [
        SourceFormat::Js,
        SourceFormat::Coffee,
        SourceFormat::Css,
        SourceFormat::Sass,
        SourceFormat::Scss,
    ];

    /// Formats handled by the compiler worker
    pub const FOREIGN: [SourceFormat; 3] =
        [SourceFormat::Coffee, SourceFormat::Sass, SourceFormat::Scss];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" => Some(SourceFormat::Js),
            "coffee" => Some(SourceFormat::Coffee),
            "css" => Some(SourceFormat::Css),
            "sass" => Some(SourceFormat::Sass),
            "scss" => Some(SourceFormat::Scss),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// File extension, which doubles as the worker's format tag
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Js => "js",
            SourceFormat::Coffee => "coffee",
            SourceFormat::Css => "css",
            SourceFormat::Sass => "sass",
            SourceFormat::Scss => "scss",
        }
    }

    pub fn kind(self) -> AssetKind {
        match self {
            SourceFormat::Js | SourceFormat::Coffee => AssetKind::Script,
            SourceFormat::Css | SourceFormat::Sass | SourceFormat::Scss => AssetKind::Stylesheet,
        }
    }

    pub fn class(self) -> CompileClass {
        match self {
            SourceFormat::Js | SourceFormat::Css => CompileClass::Native,
            SourceFormat::Coffee | SourceFormat::Sass | SourceFormat::Scss => CompileClass::Foreign,
        }
    }

    pub fn is_foreign(self) -> bool {
        self.class() == CompileClass::Foreign
    }

    /// Format of the text this source turns into once compiled
    pub fn output_format(self) -> SourceFormat {
        self.kind().native_format()
    }

    /// Source formats that can back a request for this format, in lookup order.
    ///
    /// A request for `.js` may be served from a `.coffee` file and a request
    /// for `.css` from `.sass` or `.scss`. Foreign formats only match themselves.
    pub fn source_candidates(self) -> &'static [SourceFormat] {
        match self {
            SourceFormat::Js => &[SourceFormat::Js, SourceFormat::Coffee],
            SourceFormat::Css => &[SourceFormat::Css, SourceFormat::Sass, SourceFormat::Scss],
            SourceFormat::Coffee => &[SourceFormat::Coffee],
            SourceFormat::Sass => &[SourceFormat::Sass],
            SourceFormat::Scss => &[SourceFormat::Scss],
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A logical asset path, relative to the assets root, with its format.
///
/// `display` keeps the text the path was created from so error messages show
/// what the user (or the requiring file) actually wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath {
    display: String,
    relative: String,
    format: SourceFormat,
}

impl AssetPath {
    /// Parse an entry path, either URL style (`/assets/js/app.js`) or
    /// relative to the assets root (`js/app.js`).
    pub fn parse(input: &str, url_prefix: &str) -> CabooseResult<Self> {
        let relative = normalize(strip_url_prefix(input, url_prefix));
        let format = SourceFormat::from_path(Path::new(&relative)).ok_or_else(|| {
            CabooseError::UnsupportedAsset {
                path: input.to_string(),
            }
        })?;

        Ok(Self {
            display: input.to_string(),
            relative,
            format,
        })
    }

    /// Build the path named by a require directive.
    ///
    /// A spec without a supported extension gets the requiring file's output
    /// extension, so `js/normal` required from a `.coffee` file is `js/normal.js`.
    pub fn from_require(spec: &str, requiring: SourceFormat) -> Self {
        let spec = normalize(spec.trim_start_matches('/'));
        let explicit = SourceFormat::from_path(Path::new(&spec));
        let (relative, format) = match explicit {
            Some(format) => (spec, format),
            None => {
                let format = requiring.output_format();
                (format!("{}.{}", spec, format.extension()), format)
            }
        };

        Self {
            display: relative.clone(),
            relative,
            format,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Path relative to the assets root, `/`-separated, with extension
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn kind(&self) -> AssetKind {
        self.format.kind()
    }

    /// The same logical asset backed by a source file of another format.
    ///
    /// Keeps the display text, so errors still name what was requested.
    pub fn with_source_format(&self, format: SourceFormat) -> Self {
        let stem = self
            .relative
            .strip_suffix(self.format.extension())
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&self.relative);

        Self {
            display: self.display.clone(),
            relative: format!("{}.{}", stem, format.extension()),
            format,
        }
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// `/`-joined path with `.` and empty segments dropped.
///
/// `..` is kept; the resolver refuses paths that climb out of the root.
fn normalize(relative: &str) -> String {
    Path::new(relative)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn strip_url_prefix<'a>(input: &'a str, url_prefix: &str) -> &'a str {
    if !url_prefix.is_empty() {
        if let Some(rest) = input.strip_prefix(url_prefix) {
            return rest.trim_start_matches('/');
        }
    }
    input.trim_start_matches('/')
}
