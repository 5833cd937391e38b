use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{Error, Result};

/// Initialize a tracing subscriber with default configuration.
///
/// Hosts embedding the reconciler usually install their own subscriber;
/// this is for standalone use. Uses `RUST_LOG`, defaulting to "info".
pub fn init() -> Result<()> {
    init_with_default("info")
}

/// Same as [`init`], with a custom fallback filter when `RUST_LOG` is unset.
pub fn init_with_default(default_filter: &str) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })
}
