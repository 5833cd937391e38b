//! Shared test utilities for the check-sync workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each define their own fake API. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`fixtures`]: synthetic check documents as users write them and as the API returns them
//! - [`client`]: fake [`RemoteFetch`](check_reconcile::RemoteFetch) implementations
//! - [`store`]: in-memory [`StateStore`](check_reconcile::StateStore)

pub mod client;
pub mod fixtures;
pub mod store;

pub use client::{PendingClient, StaticClient};
pub use store::MemoryStateStore;
