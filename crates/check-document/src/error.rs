//! Error types for check-document

use crate::format::Format;

/// Result type for check-document operations
pub type Result<T> = std::result::Result<T, Error>;

/// A document that could not be turned into a canonical tree.
///
/// Also raised for well-formed text whose root is not a mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse {format} document{}: {reason}", offset_suffix(.offset))]
pub struct ParseError {
    /// Syntax the parser was reading when it failed
    pub format: Format,
    /// Parser message
    pub reason: String,
    /// Byte offset into the source, when the parser reports one
    pub offset: Option<usize>,
}

impl ParseError {
    pub fn new(format: Format, reason: impl Into<String>) -> Self {
        Self {
            format,
            reason: reason.into(),
            offset: None,
        }
    }

    pub fn at(mut self, offset: Option<usize>) -> Self {
        self.offset = offset;
        self
    }
}

fn offset_suffix(offset: &Option<usize>) -> String {
    offset.map(|o| format!(" at byte {o}")).unwrap_or_default()
}

/// Errors that can occur in check-document operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid policy path '{path}': {reason}")]
    InvalidPolicyPath { path: String, reason: String },
}

impl Error {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPolicyPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convert a 1-based line/column pair into a byte offset within `source`.
///
/// Returns `None` when the parser did not report a position (line 0).
pub(crate) fn offset_at(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();

    Some((line_start + column.saturating_sub(1)).min(source.len()))
}
