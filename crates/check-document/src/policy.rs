//! Server-owned field policy
//!
//! The remote API stamps fields onto every synthetic check it returns:
//! timestamps, a revision counter, bookkeeping labels and the permissions
//! it stores in a separate table. None of these are authored by users, so
//! they must never cause local state to be rewritten. The policy lists
//! them explicitly; a new server-injected field requires a new entry here
//! and a bump of [`POLICY_VERSION`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::handlers::canonical_value;
use crate::path::{PathPattern, PathSegment};

/// Version of the built-in synthetic check policy table
pub const POLICY_VERSION: u32 = 1;

/// Paths the API owns on a synthetic check
const SERVER_OWNED: &[&[&str]] = &[
    &["metadata", "createdAt"],
    &["metadata", "updatedAt"],
    &["metadata", "version"],
    &["metadata", "labels", "dash0.com/id"],
    &["metadata", "labels", "dash0.com/version"],
    &["metadata", "labels", "dash0.com/origin"],
    &["metadata", "labels", "dash0.com/dataset"],
    &["spec", "permissions"],
];

/// Paths the API fills with an empty mapping when the user left them out
const EMPTY_MAP_DEFAULTS: &[&[&str]] = &[&["metadata", "annotations"], &["metadata", "labels"]];

/// A documented default: a value equal to `value` at `path` is the same as
/// the field being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValue {
    pub path: PathPattern,
    pub value: Value,
}

/// Static table of ignored, order-insensitive and defaulted paths
#[derive(Debug, Clone, PartialEq)]
pub struct IgnorePolicy {
    version: u32,
    ignored: Vec<PathPattern>,
    unordered: Vec<PathPattern>,
    defaults: Vec<DefaultValue>,
}

impl IgnorePolicy {
    /// A policy that ignores nothing
    pub fn empty() -> Self {
        Self {
            version: POLICY_VERSION,
            ignored: Vec::new(),
            unordered: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// The built-in policy for synthetic checks
    pub fn synthetic_check() -> Self {
        let mut policy = Self::empty();
        policy.ignored = SERVER_OWNED
            .iter()
            .map(|keys| PathPattern::from_keys(keys))
            .collect();
        policy.defaults = EMPTY_MAP_DEFAULTS
            .iter()
            .map(|keys| DefaultValue {
                path: PathPattern::from_keys(keys),
                value: Value::Object(Map::new()),
            })
            .collect();
        policy
    }

    /// Extend the built-in synthetic check policy with configured entries.
    pub fn from_config(config: &PolicyConfig) -> Self {
        let mut policy = Self::synthetic_check();
        for path in &config.extra_ignore {
            policy = policy.with_ignored(path.clone());
        }
        for path in &config.unordered {
            policy = policy.with_unordered(path.clone());
        }
        for default in &config.defaults {
            policy = policy.with_default(default.path.clone(), default.value.clone());
        }
        policy
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn ignored(&self) -> &[PathPattern] {
        &self.ignored
    }

    pub fn unordered(&self) -> &[PathPattern] {
        &self.unordered
    }

    pub fn defaults(&self) -> &[DefaultValue] {
        &self.defaults
    }

    pub fn with_ignored(mut self, path: PathPattern) -> Self {
        if !self.ignored.contains(&path) {
            self.ignored.push(path);
        }
        self
    }

    /// Mark a sequence whose element order carries no meaning.
    pub fn with_unordered(mut self, path: PathPattern) -> Self {
        if !self.unordered.contains(&path) {
            self.unordered.push(path);
        }
        self
    }

    pub fn with_default(mut self, path: PathPattern, value: Value) -> Self {
        self.defaults.push(DefaultValue {
            path,
            value: canonical_value(value),
        });
        self
    }

    /// Parse-and-add convenience for string paths.
    pub fn ignore(self, path: &str) -> Result<Self> {
        Ok(self.with_ignored(path.parse()?))
    }

    pub fn is_ignored(&self, path: &[PathSegment]) -> bool {
        self.ignored.iter().any(|p| p.matches(path))
    }

    pub fn is_unordered(&self, path: &[PathSegment]) -> bool {
        self.unordered.iter().any(|p| p.matches(path))
    }

    /// Is `value` the documented default for `path`?
    pub fn is_default(&self, path: &[PathSegment], value: &Value) -> bool {
        self.defaults
            .iter()
            .any(|d| d.path.matches(path) && d.value == *value)
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self::synthetic_check()
    }
}

/// Configurable additions to the built-in policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Additional server-owned paths to strip
    #[serde(default)]
    pub extra_ignore: Vec<PathPattern>,

    /// Sequences compared as sets
    #[serde(default)]
    pub unordered: Vec<PathPattern>,

    /// Additional documented defaults
    #[serde(default)]
    pub defaults: Vec<DefaultValue>,
}
