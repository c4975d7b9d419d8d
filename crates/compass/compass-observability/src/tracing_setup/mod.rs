//! Tracing setup: structured JSON logging with span definitions and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "COMPASS_LOG";

static INIT: Once = Once::new();

/// Initialize the global subscriber with structured JSON output.
///
/// Respects `COMPASS_LOG` (e.g. `COMPASS_LOG=compass_engine=debug,info`),
/// falling back to `default_level` when unset or invalid. Idempotent; a
/// subscriber installed elsewhere first is left in place.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init();
    });
}

/// Initialize tracing with an explicit filter string (for tests or embedding).
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
