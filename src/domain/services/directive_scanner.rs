//! Directive scanner
//!
//! Extracts `require` directives from the header of an asset source file.
//!
//! The header is the leading run of blank lines and comments:
//!
//! ```text
//! //= require js/normal          (js, sass, scss)
//! #= require js/normal           (coffee)
//! /*
//!  *= require css/normal         (css, sass, scss)
//!  */
//! ```
//!
//! Anything after the first line of code is body text and is never scanned.

use std::collections::{HashMap, HashSet};

use crate::models::{AssetPath, SourceFormat};

/// A require directive found in a file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// 0-based line index in the source
    pub line: usize,
    /// Path spec as written, e.g. `js/sub/normal`
    pub spec: String,
}

/// Header region of a source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub directives: Vec<Directive>,
    /// Block comments inside the header, as inclusive line ranges
    pub blocks: Vec<(usize, usize)>,
    /// Number of lines the header spans
    pub end: usize,
}

#[derive(Debug, Clone, Copy)]
struct CommentSyntax {
    line: Option<&'static str>,
    block: bool,
}

fn comment_syntax(format: SourceFormat) -> CommentSyntax {
    match format {
        SourceFormat::Js => CommentSyntax {
            line: Some("//"),
            block: false,
        },
        SourceFormat::Coffee => CommentSyntax {
            line: Some("#"),
            block: false,
        },
        SourceFormat::Css => CommentSyntax {
            line: None,
            block: true,
        },
        SourceFormat::Sass | SourceFormat::Scss => CommentSyntax {
            line: Some("//"),
            block: true,
        },
    }
}

/// Scan the header region of `raw` using the comment syntax of `format`.
pub fn scan_header(format: SourceFormat, raw: &str) -> Header {
    let raw = strip_bom(raw);
    let syntax = comment_syntax(format);
    let lines: Vec<&str> = raw.lines().collect();
    let mut header = Header::default();

    let mut i = 0;
    while i < lines.len() {
        let trimmed = lines[i].trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if let Some(marker) = syntax.line {
            if let Some(rest) = trimmed.strip_prefix(marker) {
                if let Some(spec) = rest.strip_prefix('=').and_then(parse_require) {
                    header.directives.push(Directive { line: i, spec });
                }
                i += 1;
                continue;
            }
        }

        if syntax.block && trimmed.starts_with("/*") {
            let end = find_block_end(format, &lines, i);
            for (j, line) in lines.iter().enumerate().take(end + 1).skip(i) {
                if let Some(spec) = block_line_directive(line, j == i) {
                    header.directives.push(Directive { line: j, spec });
                }
            }
            header.blocks.push((i, end));
            i = end + 1;
            continue;
        }

        break;
    }

    header.end = i;
    header
}

/// Extract the assets required by `source`, in file order.
///
/// `source` must carry the format of the file actually read, since that
/// decides the comment syntax. Specs without an extension take the source's
/// output extension.
pub fn extract_requires(source: &AssetPath, raw: &str) -> Vec<AssetPath> {
    scan_header(source.format(), raw)
        .directives
        .into_iter()
        .map(|d| AssetPath::from_require(&d.spec, source.format()))
        .collect()
}

/// Remove directive lines from the header, keeping every other byte.
///
/// A block comment that held nothing but directives is removed entirely.
/// A leading byte order mark is dropped so it cannot end up mid-bundle.
pub fn strip_directives(format: SourceFormat, raw: &str) -> String {
    let raw = strip_bom(raw);
    let header = scan_header(format, raw);
    if header.directives.is_empty() {
        return raw.to_string();
    }

    let lines: Vec<&str> = raw.lines().collect();
    let directive_lines: HashSet<usize> = header.directives.iter().map(|d| d.line).collect();
    let mut dropped: HashSet<usize> = directive_lines.clone();
    let mut replaced: HashMap<usize, &str> = HashMap::new();

    for &(start, end) in &header.blocks {
        let has_directive = (start..=end).any(|j| directive_lines.contains(&j));
        if !has_directive {
            continue;
        }

        let only_directives = (start..=end)
            .all(|j| directive_lines.contains(&j) || is_block_delimiter(lines[j]));
        if only_directives {
            dropped.extend(start..=end);
            continue;
        }

        // Keep the comment well formed when a directive shares a line with a delimiter
        for j in (start..=end).filter(|j| directive_lines.contains(j)) {
            if j == start {
                replaced.insert(j, "/*");
            } else if lines[j].contains("*/") {
                replaced.insert(j, " */");
            }
        }
    }

    let mut out = String::with_capacity(raw.len());
    for (i, piece) in raw.split_inclusive('\n').enumerate() {
        if let Some(text) = replaced.get(&i) {
            out.push_str(text);
            out.push_str(line_ending(piece));
        } else if !dropped.contains(&i) {
            out.push_str(piece);
        }
    }
    out
}

fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Parse the text after `=` of a directive: `require <spec>`.
fn parse_require(rest: &str) -> Option<String> {
    let rest = rest.trim_start();
    let after = rest.strip_prefix("require")?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    let spec = after
        .trim()
        .trim_end_matches("*/")
        .split_whitespace()
        .next()?
        .trim_matches(|c| c == '"' || c == '\'');

    if spec.is_empty() {
        None
    } else {
        Some(spec.to_string())
    }
}

fn block_line_directive(line: &str, opening: bool) -> Option<String> {
    let mut text = line.trim();
    if opening {
        text = text.strip_prefix("/*")?;
        if let Some(rest) = text.strip_prefix('=') {
            return parse_require(rest);
        }
    }

    let rest = text.trim_start().strip_prefix("*=")?;
    parse_require(rest.trim_end().trim_end_matches("*/"))
}

fn find_block_end(format: SourceFormat, lines: &[&str], start: usize) -> usize {
    let opening = lines[start];
    let after_open = opening.find("/*").map(|p| &opening[p + 2..]).unwrap_or("");
    if after_open.contains("*/") {
        return start;
    }

    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        // Indented syntax closes a comment by dedenting
        if format == SourceFormat::Sass
            && !line.trim().is_empty()
            && !line.starts_with(char::is_whitespace)
        {
            return j - 1;
        }
        if line.contains("*/") {
            return j;
        }
    }

    lines.len() - 1
}

fn is_block_delimiter(line: &str) -> bool {
    line.trim().chars().all(|c| c == '/' || c == '*')
}

fn line_ending(piece: &str) -> &str {
    if piece.ends_with("\r\n") {
        "\r\n"
    } else if piece.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
