//! Diagnostic logging setup.
//!
//! Report lines go to stdout; `tracing` output goes to stderr so the report stays clean when
//! redirected.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive (for example `debug` or
/// `doc_graph=debug`).
pub const LOG_FILTER_ENV: &str = "DOCS_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. A second call is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
