//! Reconciliation of stored synthetic check state against the remote API
//!
//! This crate decides, on every read of a synthetic check, whether the
//! locally stored definition must be overwritten by what the API returns:
//!
//! - **Reconciler**: fetch, normalize both sides, compare, decide
//! - **Verdict**: `Unchanged`, `Replacing` or `ReplacingWithWarning`
//! - **Diagnostics**: warnings and errors surfaced without aborting the read
//! - **Resource**: a host-style read operation built on the reconciler
//!
//! # Architecture
//!
//! ```text
//!              host framework (state, transport)
//!                        |
//!                 check-reconcile
//!                        |
//!                 check-document
//! ```
//!
//! The crate performs no I/O of its own. Fetching goes through the
//! [`RemoteFetch`] trait and persisting through [`StateStore`], both
//! implemented by the host.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod resource;
pub mod verdict;

pub use client::{FetchError, RemoteFetch};
pub use config::ReconcileConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity, TracingSink};
pub use error::{Error, Result};
pub use model::StoredRecord;
pub use reconcile::{ReconcileState, Reconciler};
pub use resource::{ReadRequest, ReadResponse, StateStore, SyntheticCheckResource};
pub use verdict::{Outcome, ReconciliationVerdict};
