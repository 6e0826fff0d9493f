//! Wire format spoken with the compiler worker
//!
//! ```text
//! request:  <format><<<option><<<content>
//! response: <status><<<body>
//! ```
//!
//! Fields are not escaped. Content that itself contains `<<` is sent as-is and
//! the worker sees an ambiguous frame; this matches the existing workers.

use crate::error::{CabooseError, CabooseResult};
use crate::models::SourceFormat;

/// Field separator in both directions
pub const DELIMITER: &str = "<<";

/// Status the worker sends when compilation failed
pub const STATUS_ERROR: &str = "error";

/// One compile call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileRequest<'a> {
    pub format: SourceFormat,
    /// Empty, or a compiler flag such as `line_numbers`
    pub option: &'a str,
    pub content: &'a str,
}

impl<'a> CompileRequest<'a> {
    pub fn new(format: SourceFormat, option: &'a str, content: &'a str) -> Self {
        Self {
            format,
            option,
            content,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let format = self.format.extension();
        let mut frame =
            Vec::with_capacity(format.len() + self.option.len() + self.content.len() + 2 * DELIMITER.len());
        frame.extend_from_slice(format.as_bytes());
        frame.extend_from_slice(DELIMITER.as_bytes());
        frame.extend_from_slice(self.option.as_bytes());
        frame.extend_from_slice(DELIMITER.as_bytes());
        frame.extend_from_slice(self.content.as_bytes());
        frame
    }
}

/// Parsed worker response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileReply {
    Compiled(String),
    /// Diagnostic text from the compiler
    Failed(String),
}

impl CompileReply {
    /// Parse `<status><<<body>`.
    ///
    /// Only the first delimiter splits; the body is kept whole. Any status
    /// other than `error` counts as success.
    pub fn parse(response: &str) -> CabooseResult<Self> {
        let (status, body) =
            response
                .split_once(DELIMITER)
                .ok_or_else(|| CabooseError::MalformedResponse {
                    response: truncate(response, 200),
                })?;

        if status == STATUS_ERROR {
            Ok(CompileReply::Failed(body.to_string()))
        } else {
            Ok(CompileReply::Compiled(body.to_string()))
        }
    }

    pub fn into_result(self, format: SourceFormat) -> CabooseResult<String> {
        match self {
            CompileReply::Compiled(body) => Ok(body),
            CompileReply::Failed(message) => Err(CabooseError::Compile {
                format: format.to_string(),
                message,
            }),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
