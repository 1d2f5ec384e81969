// src/logging.rs
// =============================================================================
// Diagnostic logging via `tracing`, written to stderr so stdout only ever
// carries results. RUST_LOG, when set, replaces the defaults below.
// =============================================================================

use tracing_subscriber::EnvFilter;

// Per-URL outcomes are logged at debug: shown with -v, hidden otherwise
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,wsc=debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // try_init: a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
