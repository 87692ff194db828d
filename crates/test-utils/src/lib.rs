pub mod builders;
pub mod scripted_backend;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Route the controller's `tracing` output into the test harness.
///
/// Idempotent across tests in one binary. `RUST_LOG` picks the filter,
/// `info` otherwise, so the poller's per-describe `debug!` lines stay quiet
/// unless asked for.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}
