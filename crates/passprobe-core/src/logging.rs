//! Logging bootstrap for PassProbe binaries.
//!
//! The workspace logs through the `log` facade; records are collected by a
//! `tracing_subscriber` fmt layer whose filter is driven by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initialise global logging. `default_filter` applies when `RUST_LOG` is
/// unset. Calling this more than once is harmless.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_owned()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
