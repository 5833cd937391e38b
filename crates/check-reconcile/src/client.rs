//! Remote fetch collaborator

use std::sync::Arc;

use async_trait::async_trait;

/// Failures to obtain the remote document.
///
/// All of them are fatal to the current read and leave local state as it
/// was; retrying is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Synthetic check not found in origin '{origin}', dataset '{dataset}'")]
    NotFound { origin: String, dataset: String },

    #[error("Fetch was cancelled")]
    Cancelled,
}

/// Source of the API's current representation of a synthetic check
#[async_trait]
pub trait RemoteFetch: Send + Sync {
    /// Return the raw document text the API currently holds.
    async fn fetch_synthetic_check(
        &self,
        origin: &str,
        dataset: &str,
    ) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: RemoteFetch + ?Sized> RemoteFetch for Arc<T> {
    async fn fetch_synthetic_check(
        &self,
        origin: &str,
        dataset: &str,
    ) -> Result<String, FetchError> {
        (**self).fetch_synthetic_check(origin, dataset).await
    }
}
