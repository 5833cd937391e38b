//! Persisted synthetic check state

use serde::{Deserialize, Serialize};

/// A synthetic check as held in local state.
///
/// `document` is the raw text the user authored, or the raw text the API
/// returned when a reconciliation replaced it. It is never the normalized
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub origin: String,
    pub dataset: String,
    #[serde(rename = "synthetic_check_yaml")]
    pub document: String,
}

impl StoredRecord {
    pub fn new(
        origin: impl Into<String>,
        dataset: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            dataset: dataset.into(),
            document: document.into(),
        }
    }

    /// Same identity, new document text.
    pub fn with_document(&self, document: impl Into<String>) -> Self {
        Self {
            origin: self.origin.clone(),
            dataset: self.dataset.clone(),
            document: document.into(),
        }
    }
}
