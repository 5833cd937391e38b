//! Document normalization and semantic comparison for synthetic checks
//!
//! Parses synthetic check definitions written either as YAML or as JSON into
//! one canonical tree, strips the fields the remote API owns, and compares
//! the result structurally.
//!
//! # Example
//!
//! ```
//! use check_document::{Normalizer, equivalent};
//!
//! let normalizer = Normalizer::default();
//! let local = normalizer.normalize("spec:\n  enabled: true\n").unwrap();
//! let remote = normalizer
//!     .normalize(r#"{"metadata":{"version":3},"spec":{"enabled":true}}"#)
//!     .unwrap();
//! assert!(equivalent(&local, &remote));
//! ```

pub mod diff;
pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod path;
pub mod policy;

pub use diff::{SemanticChange, SemanticDiff, equivalent};
pub use document::{NormalizedDocument, Normalizer};
pub use error::{Error, ParseError, Result};
pub use format::{Format, FormatHandler};
pub use path::{PathPattern, PathSegment};
pub use policy::{DefaultValue, IgnorePolicy, POLICY_VERSION, PolicyConfig};
