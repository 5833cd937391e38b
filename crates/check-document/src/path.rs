//! Path parsing and matching utilities
//!
//! Policy entries and reported changes address nodes of a canonical
//! document with dot-separated paths.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `spec.plugin.kind`
//! - Array indexing: `spec.assertions[0].kind`
//! - Quoted keys, for keys containing dots or brackets:
//!   `metadata.labels["dash0.com/id"]`
//! - Wildcards: `*` matches any key, `[*]` matches any index
//!
//! # Examples
//!
//! ```
//! use check_document::path::{PathPattern, PathSegment};
//!
//! let pattern: PathPattern = r#"metadata.labels["dash0.com/id"]"#.parse().unwrap();
//! assert_eq!(pattern.segments(), &[
//!     PathSegment::Key("metadata".to_string()),
//!     PathSegment::Key("labels".to_string()),
//!     PathSegment::Key("dash0.com/id".to_string()),
//! ]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A segment of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key in a mapping
    Key(String),
    /// An index in a sequence
    Index(usize),
    /// Any key (`*`); only meaningful in patterns
    AnyKey,
    /// Any index (`[*]`); only meaningful in patterns
    AnyIndex,
}

impl PathSegment {
    /// Does this pattern segment accept the concrete segment?
    pub fn accepts(&self, concrete: &PathSegment) -> bool {
        match (self, concrete) {
            (Self::AnyKey, Self::Key(_)) => true,
            (Self::AnyIndex, Self::Index(_)) => true,
            (a, b) => a == b,
        }
    }

    fn needs_quoting(key: &str) -> bool {
        key.is_empty()
            || key == "*"
            || key.contains(['.', '[', ']', '"'])
    }
}

/// Parse a path string into segments.
///
/// # Examples
///
/// ```
/// use check_document::path::{parse_path, PathSegment};
///
/// let path = parse_path("spec.assertions[*].kind").unwrap();
/// assert_eq!(path, vec![
///     PathSegment::Key("spec".to_string()),
///     PathSegment::Key("assertions".to_string()),
///     PathSegment::AnyIndex,
///     PathSegment::Key("kind".to_string()),
/// ]);
/// ```
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    // Set after `]` so that `a[0].b` and `a[0][1]` are accepted but `a[0]b` is not.
    let mut after_bracket = false;
    let mut chars = path.chars().peekable();

    let invalid = |reason: &str| Error::invalid_path(path, reason);

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if current_key.is_empty() && !after_bracket {
                    return Err(invalid("empty key"));
                }
                if !current_key.is_empty() {
                    segments.push(key_segment(std::mem::take(&mut current_key)));
                }
                after_bracket = false;
                if chars.peek().is_none() {
                    return Err(invalid("trailing '.'"));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(key_segment(std::mem::take(&mut current_key)));
                }

                if chars.peek() == Some(&'"') {
                    chars.next();
                    let mut quoted = String::new();
                    let mut closed = false;
                    while let Some(ch) = chars.next() {
                        match ch {
                            '\\' => match chars.next() {
                                Some(escaped) => quoted.push(escaped),
                                None => break,
                            },
                            '"' => {
                                closed = true;
                                break;
                            }
                            other => quoted.push(other),
                        }
                    }
                    if !closed || chars.next() != Some(']') {
                        return Err(invalid("unterminated quoted key"));
                    }
                    segments.push(PathSegment::Key(quoted));
                } else {
                    let mut index_str = String::new();
                    let mut closed = false;
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            closed = true;
                            break;
                        }
                        index_str.push(ch);
                    }
                    if !closed {
                        return Err(invalid("unterminated index"));
                    }
                    if index_str == "*" {
                        segments.push(PathSegment::AnyIndex);
                    } else {
                        let index = index_str
                            .parse::<usize>()
                            .map_err(|_| invalid("index must be a number or '*'"))?;
                        segments.push(PathSegment::Index(index));
                    }
                }
                after_bracket = true;
            }
            ']' | '"' => return Err(invalid("unexpected character")),
            _ => {
                if after_bracket {
                    return Err(invalid("expected '.' or '[' after ']'"));
                }
                current_key.push(ch);
            }
        }
    }

    if !current_key.is_empty() {
        segments.push(key_segment(current_key));
    }

    if segments.is_empty() {
        return Err(invalid("empty path"));
    }

    Ok(segments)
}

fn key_segment(key: String) -> PathSegment {
    if key == "*" {
        PathSegment::AnyKey
    } else {
        PathSegment::Key(key)
    }
}

/// Render segments back into path syntax.
pub fn display_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) if PathSegment::needs_quoting(key) => {
                out.push_str("[\"");
                for ch in key.chars() {
                    if ch == '"' || ch == '\\' {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push_str("\"]");
            }
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::AnyKey => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push('*');
            }
            PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
            PathSegment::AnyIndex => out.push_str("[*]"),
        }
    }
    out
}

/// Get a value at the given path.
///
/// Returns `None` if the path doesn't exist. Wildcards never match here.
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };

    let next_value = match first {
        PathSegment::Key(key) => value.get(key)?,
        PathSegment::Index(idx) => value.get(*idx)?,
        PathSegment::AnyKey | PathSegment::AnyIndex => return None,
    };

    get_at_path(next_value, rest)
}

/// A parsed path pattern, kept together with its source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathPattern {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Build a pattern from literal keys, without parsing.
    pub fn from_keys(keys: &[&str]) -> Self {
        let segments: Vec<_> = keys
            .iter()
            .map(|k| PathSegment::Key((*k).to_string()))
            .collect();
        Self {
            raw: display_path(&segments),
            segments,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Does this pattern address exactly the given concrete path?
    pub fn matches(&self, path: &[PathSegment]) -> bool {
        self.segments.len() == path.len()
            && self
                .segments
                .iter()
                .zip(path)
                .all(|(pattern, concrete)| pattern.accepts(concrete))
    }
}

impl FromStr for PathPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self {
            raw: s.to_string(),
            segments: parse_path(s)?,
        })
    }
}

impl TryFrom<String> for PathPattern {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PathPattern> for String {
    fn from(pattern: PathPattern) -> Self {
        pattern.raw
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
