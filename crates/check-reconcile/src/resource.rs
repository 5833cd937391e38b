//! Host-facing synthetic check resource
//!
//! Wraps the [`Reconciler`] in the request/response shape a resource
//! framework expects from a read: prior state in, new state plus
//! diagnostics out.

use crate::client::RemoteFetch;
use crate::diagnostics::Diagnostics;
use crate::model::StoredRecord;
use crate::reconcile::Reconciler;

/// Persists the state a read produced; implemented by the host.
pub trait StateStore {
    fn persist(&mut self, record: StoredRecord);
}

/// Input of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    /// State as persisted after the previous operation
    pub state: StoredRecord,
}

/// Output of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResponse {
    /// State to persist; equals the prior state unless a replacement was decided
    pub state: StoredRecord,
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    /// Hand the state to `store` and return the diagnostics for the host.
    pub fn commit<S: StateStore + ?Sized>(self, store: &mut S) -> Diagnostics {
        store.persist(self.state);
        self.diagnostics
    }
}

/// A synthetic check resource backed by a remote client
#[derive(Debug, Clone)]
pub struct SyntheticCheckResource<C> {
    client: C,
    reconciler: Reconciler,
}

impl<C: RemoteFetch> SyntheticCheckResource<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            reconciler: Reconciler::default(),
        }
    }

    pub fn with_reconciler(mut self, reconciler: Reconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Refresh state from the API.
    ///
    /// A fetch failure yields an error diagnostic and the prior state
    /// unchanged. Everything else succeeds, possibly with a warning.
    pub async fn read(&self, request: ReadRequest) -> ReadResponse {
        let mut diagnostics = Diagnostics::new();
        let prior = request.state;

        let state = match self
            .reconciler
            .reconcile_with_sink(&prior, &self.client, &mut diagnostics)
            .await
        {
            Ok(verdict) => verdict.resolve(prior),
            Err(_) => prior,
        };

        ReadResponse { state, diagnostics }
    }
}
