//! Reconciliation configuration parsed from TOML
//!
//! Configuration can only extend the built-in, versioned policy table:
//!
//! ```toml
//! [policy]
//! extra_ignore = ['spec.schedule.nextRunAt']
//! unordered = ['spec.locations']
//!
//! [[policy.defaults]]
//! path = 'spec.retries'
//! value = 0
//!
//! [diagnostics]
//! log_change_summary = true
//! ```

use std::path::Path;

use check_document::{IgnorePolicy, PolicyConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Diagnostics settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSection {
    /// Log each changed value when a stored document is replaced
    #[serde(default)]
    pub log_change_summary: bool,
}

/// Reconciliation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Additions to the server-owned field policy
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsSection,
}

impl ReconcileConfig {
    /// Parse a configuration from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use check_reconcile::ReconcileConfig;
    ///
    /// let config = ReconcileConfig::parse(r#"
    /// [policy]
    /// unordered = ["spec.locations"]
    /// "#).unwrap();
    ///
    /// assert_eq!(config.policy.unordered.len(), 1);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Built-in synthetic check policy extended with this configuration
    pub fn policy(&self) -> IgnorePolicy {
        IgnorePolicy::from_config(&self.policy)
    }
}
