//! Logging setup for binaries built on Parley.
//!
//! The library crates only emit `tracing` events; they never install a
//! subscriber. Applications call [`init_tracing`] once at startup (or set
//! up their own subscriber).

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// When `RUST_LOG` is unset or unparsable, `default_filter` is used
/// instead (e.g. `"info"` or `"parley_command=debug,info"`).
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    default_filter: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
