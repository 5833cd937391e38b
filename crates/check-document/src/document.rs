//! Normalized documents
//!
//! A [`NormalizedDocument`] is the comparison-only form of a synthetic check:
//! parsed from either syntax, keys sorted, scalars canonicalized, and every
//! server-owned path removed. It is never written back to state.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::ParseError;
use crate::format::Format;
use crate::handlers::handler_for;
use crate::path::{PathSegment, get_at_path, parse_path};
use crate::policy::IgnorePolicy;

/// Canonical tree of a document with server-owned fields removed
#[derive(Debug, Clone)]
pub struct NormalizedDocument {
    root: Value,
    format: Format,
}

impl NormalizedDocument {
    /// The canonical tree. The root is always a mapping.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Syntax the source text was written in
    pub fn format(&self) -> Format {
        self.format
    }

    /// Look up a node by path, e.g. `spec.plugin.kind`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = parse_path(path).ok()?;
        get_at_path(&self.root, &segments)
    }

    pub fn is_empty(&self) -> bool {
        self.root.as_object().map_or(true, Map::is_empty)
    }

    /// SHA-256 of the canonical serialization, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.root.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Two documents are equal when their canonical trees are; the source
/// syntax does not matter.
impl PartialEq for NormalizedDocument {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

/// Parses documents and applies an [`IgnorePolicy`]
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: IgnorePolicy,
}

impl Normalizer {
    pub fn new(policy: IgnorePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IgnorePolicy {
        &self.policy
    }

    /// Parse `source` and strip server-owned fields.
    ///
    /// Empty and comment-only documents normalize to an empty mapping. Any
    /// other root that is not a mapping, an explicit `null` included, is
    /// reported as a [`ParseError`].
    pub fn normalize(&self, source: &str) -> Result<NormalizedDocument, ParseError> {
        if is_blank(source) {
            return Ok(NormalizedDocument {
                root: Value::Object(Map::new()),
                format: Format::Yaml,
            });
        }

        let (tree, format) = parse_tree(source)?;
        let Value::Object(_) = tree else {
            return Err(ParseError::new(
                format,
                format!(
                    "expected a mapping at the document root, found {}",
                    kind_name(&tree)
                ),
            ));
        };

        let mut path = Vec::new();
        let root = apply_policy(tree, &mut path, &self.policy);

        Ok(NormalizedDocument { root, format })
    }
}

/// Parse with the detected syntax.
///
/// Bracket-delimited text that is not strict JSON gets a second chance as
/// YAML flow syntax; if that fails too, the JSON error is reported.
fn parse_tree(source: &str) -> Result<(Value, Format), ParseError> {
    let format = Format::from_content(source);
    match handler_for(format).canonicalize(source) {
        Ok(tree) => Ok((tree, format)),
        Err(err) if format == Format::Json => handler_for(Format::Yaml)
            .canonicalize(source)
            .map(|tree| (tree, Format::Yaml))
            .map_err(|_| err),
        Err(err) => Err(err),
    }
}

/// Whitespace, comments and bare document markers only
fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Strip ignored paths, sort unordered sequences and drop defaulted values.
///
/// A mapping entry is omitted when its value is a documented default or an
/// empty mapping, so `{}` and an absent key compare equal. Sequence
/// elements are only removed when their own path is ignored; an element
/// emptied by stripping stays in place as `{}`.
fn apply_policy(value: Value, path: &mut Vec<PathSegment>, policy: &IgnorePolicy) -> Value {
    match value {
        Value::Object(map) => {
            let mut kept = Map::new();
            for (key, child) in map {
                path.push(PathSegment::Key(key.clone()));
                if !policy.is_ignored(path) {
                    let child = apply_policy(child, path, policy);
                    if !is_omitted(&child, path, policy) {
                        kept.insert(key, child);
                    }
                }
                path.pop();
            }
            Value::Object(kept)
        }
        Value::Array(items) => {
            let mut kept = Vec::with_capacity(items.len());
            for (i, child) in items.into_iter().enumerate() {
                path.push(PathSegment::Index(i));
                if !policy.is_ignored(path) {
                    kept.push(apply_policy(child, path, policy));
                }
                path.pop();
            }
            if policy.is_unordered(path) {
                kept.sort_by_cached_key(Value::to_string);
            }
            Value::Array(kept)
        }
        other => other,
    }
}

fn is_omitted(value: &Value, path: &[PathSegment], policy: &IgnorePolicy) -> bool {
    value.as_object().is_some_and(Map::is_empty) || policy.is_default(path, value)
}
