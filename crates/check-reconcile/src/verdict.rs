//! Verdict of one reconciliation

use check_document::SemanticChange;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::model::StoredRecord;

/// Terminal state of a reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Only server-owned fields differ; keep local state
    Unchanged,
    /// A user-owned field differs; adopt the remote document
    Replacing,
    /// A document could not be parsed; adopt the remote text and warn
    ReplacingWithWarning,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged => write!(f, "unchanged"),
            Self::Replacing => write!(f, "replacing"),
            Self::ReplacingWithWarning => write!(f, "replacing with warning"),
        }
    }
}

/// What the caller should do with its stored record
///
/// `replacement` is present exactly when `changed` is true, and always
/// carries the raw remote text in full.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationVerdict {
    pub outcome: Outcome,
    pub changed: bool,
    pub replacement: Option<StoredRecord>,
    pub diagnostic: Option<Diagnostic>,
    /// Semantic changes behind a `Replacing` outcome
    pub changes: Vec<SemanticChange>,
}

impl ReconciliationVerdict {
    pub fn unchanged() -> Self {
        Self {
            outcome: Outcome::Unchanged,
            changed: false,
            replacement: None,
            diagnostic: None,
            changes: Vec::new(),
        }
    }

    pub fn replacing(replacement: StoredRecord, changes: Vec<SemanticChange>) -> Self {
        Self {
            outcome: Outcome::Replacing,
            changed: true,
            replacement: Some(replacement),
            diagnostic: None,
            changes,
        }
    }

    pub fn replacing_with_warning(replacement: StoredRecord, warning: Diagnostic) -> Self {
        Self {
            outcome: Outcome::ReplacingWithWarning,
            changed: true,
            replacement: Some(replacement),
            diagnostic: Some(warning),
            changes: Vec::new(),
        }
    }

    /// The record to persist: the replacement, or `current` untouched.
    pub fn resolve(self, current: StoredRecord) -> StoredRecord {
        self.replacement.unwrap_or(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_keeps_current() {
        let current = StoredRecord::new("o", "d", "kind: A\n");
        let verdict = ReconciliationVerdict::unchanged();

        assert!(!verdict.changed);
        assert!(verdict.diagnostic.is_none());
        assert_eq!(verdict.resolve(current.clone()), current);
    }

    #[test]
    fn test_replacing_resolves_to_replacement() {
        let current = StoredRecord::new("o", "d", "kind: A\n");
        let verdict = ReconciliationVerdict::replacing(current.with_document("kind: B\n"), Vec::new());

        assert!(verdict.changed);
        assert_eq!(verdict.outcome, Outcome::Replacing);
        assert_eq!(verdict.resolve(current).document, "kind: B\n");
    }

    #[test]
    fn test_replacing_with_warning_carries_diagnostic() {
        let current = StoredRecord::new("o", "d", "kind: A\n");
        let verdict = ReconciliationVerdict::replacing_with_warning(
            current.with_document("::"),
            Diagnostic::warning("bad", "detail"),
        );

        assert!(verdict.changed);
        assert_eq!(verdict.outcome, Outcome::ReplacingWithWarning);
        assert_eq!(verdict.diagnostic.map(|d| d.summary), Some("bad".to_string()));
    }
}
