//! Reconciliation decision
//!
//! One reconciliation walks `Fetching -> Normalizing -> Comparing` and ends
//! in one of the terminal [`Outcome`]s. Only a failed fetch escapes as an
//! error; parse and comparison problems are folded into the verdict so the
//! read still succeeds.

use check_document::{IgnorePolicy, Normalizer, SemanticDiff, equivalent};
use tracing::{debug, error, info, warn};

use crate::client::{FetchError, RemoteFetch};
use crate::config::ReconcileConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::StoredRecord;
use crate::verdict::{Outcome, ReconciliationVerdict};

/// Steps of a reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    Fetching,
    Normalizing,
    Comparing,
    Done(Outcome),
}

impl std::fmt::Display for ReconcileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetching => write!(f, "fetching"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::Comparing => write!(f, "comparing"),
            Self::Done(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// Stateless decision function over a fixed [`IgnorePolicy`]
///
/// Holds no per-resource state, so one instance can serve any number of
/// concurrent reconciliations.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    normalizer: Normalizer,
    log_change_summary: bool,
}

impl Reconciler {
    pub fn new(policy: IgnorePolicy) -> Self {
        Self {
            normalizer: Normalizer::new(policy),
            log_change_summary: false,
        }
    }

    pub fn from_config(config: &ReconcileConfig) -> Self {
        Self::new(config.policy()).with_change_summary(config.diagnostics.log_change_summary)
    }

    /// Log every changed path and value when replacing, not just the paths.
    pub fn with_change_summary(mut self, enabled: bool) -> Self {
        self.log_change_summary = enabled;
        self
    }

    pub fn policy(&self) -> &IgnorePolicy {
        self.normalizer.policy()
    }

    /// Fetch the remote document and decide.
    ///
    /// On a fetch error nothing is decided and the caller keeps its record.
    pub async fn reconcile<C>(
        &self,
        stored: &StoredRecord,
        client: &C,
    ) -> Result<ReconciliationVerdict, FetchError>
    where
        C: RemoteFetch + ?Sized,
    {
        debug!(
            origin = %stored.origin,
            dataset = %stored.dataset,
            state = %ReconcileState::Fetching,
            "reconciling synthetic check"
        );

        let fetched = client
            .fetch_synthetic_check(&stored.origin, &stored.dataset)
            .await
            .inspect_err(|e| {
                error!(
                    origin = %stored.origin,
                    dataset = %stored.dataset,
                    error = %e,
                    "failed to fetch synthetic check"
                );
            })?;

        Ok(self.decide(stored, &fetched))
    }

    /// [`reconcile`](Self::reconcile), reporting diagnostics to `sink`.
    ///
    /// A fetch error is emitted as an error diagnostic and still returned.
    pub async fn reconcile_with_sink<C, S>(
        &self,
        stored: &StoredRecord,
        client: &C,
        sink: &mut S,
    ) -> Result<ReconciliationVerdict, FetchError>
    where
        C: RemoteFetch + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        match self.reconcile(stored, client).await {
            Ok(verdict) => {
                if let Some(diagnostic) = &verdict.diagnostic {
                    sink.emit(diagnostic.clone());
                }
                Ok(verdict)
            }
            Err(err) => {
                sink.emit(Diagnostic::error(
                    "Failed to read synthetic check",
                    format!(
                        "Could not read synthetic check in origin '{}', dataset '{}': {err}",
                        stored.origin, stored.dataset
                    ),
                ));
                Err(err)
            }
        }
    }

    /// Decide between keeping `stored` and adopting `fetched`.
    ///
    /// Pure: no I/O, and `stored` is never modified.
    pub fn decide(&self, stored: &StoredRecord, fetched: &str) -> ReconciliationVerdict {
        debug!(
            origin = %stored.origin,
            dataset = %stored.dataset,
            state = %ReconcileState::Normalizing,
            "normalizing documents"
        );

        let remote = match self.normalizer.normalize(fetched) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(
                    origin = %stored.origin,
                    dataset = %stored.dataset,
                    error = %err,
                    "remote synthetic check is not a valid document, adopting it as-is"
                );
                return ReconciliationVerdict::replacing_with_warning(
                    stored.with_document(fetched),
                    Diagnostic::warning(
                        "Invalid synthetic check returned by the API",
                        format!(
                            "{err}. The state was updated to the raw API response so the \
                             actual remote value is visible."
                        ),
                    ),
                );
            }
        };

        let local = match self.normalizer.normalize(&stored.document) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(
                    origin = %stored.origin,
                    dataset = %stored.dataset,
                    error = %err,
                    "stored synthetic check is not a valid document, adopting the API response"
                );
                return ReconciliationVerdict::replacing_with_warning(
                    stored.with_document(fetched),
                    Diagnostic::warning(
                        "Invalid synthetic check in state",
                        format!(
                            "{err}. The state was replaced with the document returned by the API."
                        ),
                    ),
                );
            }
        };

        debug!(
            state = %ReconcileState::Comparing,
            local = %local.fingerprint(),
            remote = %remote.fingerprint(),
            "comparing normalized documents"
        );

        if equivalent(&local, &remote) {
            debug!(
                origin = %stored.origin,
                dataset = %stored.dataset,
                state = %ReconcileState::Done(Outcome::Unchanged),
                "no significant difference"
            );
            return ReconciliationVerdict::unchanged();
        }

        let diff = SemanticDiff::compute(&local, &remote);
        info!(
            origin = %stored.origin,
            dataset = %stored.dataset,
            changed = ?diff.changed_paths(),
            similarity = diff.similarity,
            "synthetic check changed remotely, replacing stored document"
        );
        if self.log_change_summary {
            info!("changes:\n{}", diff.summary());
        }

        ReconciliationVerdict::replacing(stored.with_document(fetched), diff.changes)
    }
}
