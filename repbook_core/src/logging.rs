//! Logging infrastructure for repbook.
//!
//! Provides centralized tracing setup for the CLI binary.

use tracing_subscriber::EnvFilter;

/// Initialize logging with sensible defaults
///
/// Default level is WARN so normal CLI output stays clean; override with
/// the RUST_LOG environment variable.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// The RUST_LOG environment variable still takes precedence.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
