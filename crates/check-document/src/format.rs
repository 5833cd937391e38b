//! Format detection and handler trait

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Concrete syntaxes a synthetic check definition may arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Indentation-based syntax, as authored by users
    Yaml,
    /// Bracket-delimited syntax, as returned by the API
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from content heuristics
    ///
    /// Bracket-delimited documents start with `{` or `[`; everything else
    /// is read as YAML.
    pub fn from_content(content: &str) -> Self {
        let trimmed = content.trim_start();

        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Self::Json;
        }

        Self::Yaml
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// Trait for format-specific handlers
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse source into the canonical tree.
    ///
    /// Map keys are sorted and scalars canonicalized, but no policy is
    /// applied yet.
    fn canonicalize(&self, source: &str) -> Result<Value, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_json_object() {
        assert_eq!(Format::from_content("  {\"a\": 1}"), Format::Json);
    }

    #[test]
    fn test_from_content_json_array() {
        assert_eq!(Format::from_content("\n[1, 2]"), Format::Json);
    }

    #[test]
    fn test_from_content_yaml() {
        assert_eq!(Format::from_content("kind: Dash0SyntheticCheck\n"), Format::Yaml);
        assert_eq!(Format::from_content(""), Format::Yaml);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("YML"), Some(Format::Yaml));
        assert_eq!(Format::from_extension("json"), Some(Format::Json));
        assert_eq!(Format::from_extension("toml"), None);
    }
}
