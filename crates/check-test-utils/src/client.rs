//! Fake API clients

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use check_reconcile::{FetchError, RemoteFetch};

/// Returns the same response to every fetch and counts calls.
#[derive(Debug)]
pub struct StaticClient {
    response: Result<String, FetchError>,
    calls: AtomicUsize,
}

impl StaticClient {
    pub fn returning(document: impl Into<String>) -> Self {
        Self {
            response: Ok(document.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteFetch for StaticClient {
    async fn fetch_synthetic_check(
        &self,
        _origin: &str,
        _dataset: &str,
    ) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// A fetch that never completes, for cancellation tests.
#[derive(Debug, Default)]
pub struct PendingClient;

#[async_trait]
impl RemoteFetch for PendingClient {
    async fn fetch_synthetic_check(
        &self,
        _origin: &str,
        _dataset: &str,
    ) -> Result<String, FetchError> {
        std::future::pending().await
    }
}
