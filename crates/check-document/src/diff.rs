//! Semantic diff types and computation

use serde_json::Value;
use similar::TextDiff;

use crate::document::NormalizedDocument;
use crate::path::{PathSegment, display_path};

/// Maximum recursion depth for diff operations
const MAX_DIFF_DEPTH: usize = 128;

/// Are two normalized documents semantically the same?
///
/// Map key order never matters. Sequences are compared in order; sequences
/// the policy marks unordered were already sorted by the normalizer.
pub fn equivalent(a: &NormalizedDocument, b: &NormalizedDocument) -> bool {
    values_equivalent(a.as_value(), b.as_value(), 0)
}

fn values_equivalent(a: &Value, b: &Value, depth: usize) -> bool {
    if depth > MAX_DIFF_DEPTH {
        return a == b;
    }

    match (a, b) {
        (Value::Object(a_obj), Value::Object(b_obj)) => {
            a_obj.len() == b_obj.len()
                && a_obj.iter().all(|(key, a_val)| {
                    b_obj
                        .get(key)
                        .is_some_and(|b_val| values_equivalent(a_val, b_val, depth + 1))
                })
        }
        (Value::Array(a_arr), Value::Array(b_arr)) => {
            a_arr.len() == b_arr.len()
                && a_arr
                    .iter()
                    .zip(b_arr)
                    .all(|(a_val, b_val)| values_equivalent(a_val, b_val, depth + 1))
        }
        _ => scalars_equal(a, b),
    }
}

/// Type-aware scalar equality: numbers compare by value, so `1 == 1.0`,
/// while a boolean never equals a string.
fn scalars_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            if x.is_f64() || y.is_f64() {
                return x.as_f64() == y.as_f64();
            }
            // One side is negative and the other above i64::MAX.
            false
        }
        _ => a == b,
    }
}

/// Result of comparing two documents semantically
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticDiff {
    /// Are the documents semantically equivalent?
    pub is_equivalent: bool,
    /// List of semantic changes
    pub changes: Vec<SemanticChange>,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
}

impl SemanticDiff {
    /// Compute a semantic diff between two normalized documents
    pub fn compute(old: &NormalizedDocument, new: &NormalizedDocument) -> Self {
        Self::compute_values(old.as_value(), new.as_value())
    }

    /// Compute a semantic diff between two canonical trees
    ///
    /// This recursively compares the trees and tracks all changes with their
    /// paths (e.g., "spec.plugin.kind" for nested keys).
    pub fn compute_values(old: &Value, new: &Value) -> Self {
        let mut changes = Vec::new();
        let mut path = Vec::new();
        diff_values(old, new, &mut path, &mut changes, 0);

        Self {
            is_equivalent: changes.is_empty(),
            similarity: similarity(old, new),
            changes,
        }
    }

    /// Paths touched by this diff, in discovery order
    pub fn changed_paths(&self) -> Vec<&str> {
        self.changes.iter().map(SemanticChange::path).collect()
    }

    /// One line per change, for logs and diagnostics
    pub fn summary(&self) -> String {
        self.changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An empty diff: equivalent, fully similar
impl Default for SemanticDiff {
    fn default() -> Self {
        Self {
            is_equivalent: true,
            changes: Vec::new(),
            similarity: 1.0,
        }
    }
}

/// A semantic change between documents
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticChange {
    /// Key/path added
    Added { path: String, value: Value },
    /// Key/path removed
    Removed { path: String, value: Value },
    /// Value changed at path
    Modified { path: String, old: Value, new: Value },
}

impl SemanticChange {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

impl std::fmt::Display for SemanticChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { path, value } => write!(f, "+ {path}: {value}"),
            Self::Removed { path, value } => write!(f, "- {path}: {value}"),
            Self::Modified { path, old, new } => write!(f, "~ {path}: {old} -> {new}"),
        }
    }
}

/// Recursive diff with path and depth tracking
fn diff_values(
    old: &Value,
    new: &Value,
    path: &mut Vec<PathSegment>,
    changes: &mut Vec<SemanticChange>,
    depth: usize,
) {
    // Depth limit: treat deeply nested differences as a single modification
    if depth > MAX_DIFF_DEPTH {
        if old != new {
            changes.push(SemanticChange::Modified {
                path: display_path(path),
                old: old.clone(),
                new: new.clone(),
            });
        }
        return;
    }

    match (old, new) {
        (Value::Object(old_obj), Value::Object(new_obj)) => {
            for (key, old_value) in old_obj {
                path.push(PathSegment::Key(key.clone()));
                match new_obj.get(key) {
                    Some(new_value) => diff_values(old_value, new_value, path, changes, depth + 1),
                    None => changes.push(SemanticChange::Removed {
                        path: display_path(path),
                        value: old_value.clone(),
                    }),
                }
                path.pop();
            }

            for (key, new_value) in new_obj {
                if !old_obj.contains_key(key) {
                    path.push(PathSegment::Key(key.clone()));
                    changes.push(SemanticChange::Added {
                        path: display_path(path),
                        value: new_value.clone(),
                    });
                    path.pop();
                }
            }
        }

        (Value::Array(old_arr), Value::Array(new_arr)) => {
            let shared = old_arr.len().min(new_arr.len());
            for (i, (old_val, new_val)) in old_arr.iter().zip(new_arr).enumerate() {
                path.push(PathSegment::Index(i));
                diff_values(old_val, new_val, path, changes, depth + 1);
                path.pop();
            }
            for (i, old_val) in old_arr.iter().enumerate().skip(shared) {
                path.push(PathSegment::Index(i));
                changes.push(SemanticChange::Removed {
                    path: display_path(path),
                    value: old_val.clone(),
                });
                path.pop();
            }
            for (i, new_val) in new_arr.iter().enumerate().skip(shared) {
                path.push(PathSegment::Index(i));
                changes.push(SemanticChange::Added {
                    path: display_path(path),
                    value: new_val.clone(),
                });
                path.pop();
            }
        }

        _ => {
            if !scalars_equal(old, new) {
                changes.push(SemanticChange::Modified {
                    path: display_path(path),
                    old: old.clone(),
                    new: new.clone(),
                });
            }
        }
    }
}

/// Character-level similarity of the serialized trees, 1.0 when identical
fn similarity(old: &Value, new: &Value) -> f64 {
    if old == new {
        return 1.0;
    }
    let (old, new) = (old.to_string(), new.to_string());
    f64::from(TextDiff::from_chars(&old, &new).ratio())
}
