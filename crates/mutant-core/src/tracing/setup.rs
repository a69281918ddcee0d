//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracing/logging system.
///
/// Reads the `MUTANT_LOG` environment variable for per-target log levels.
/// Format: `MUTANT_LOG=mutant_storage=debug,mutant_core=info`
///
/// Falls back to `default_level` for the mutant crates if `MUTANT_LOG` is not
/// set or is invalid. Idempotent: only the first call installs a subscriber.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let fallback = format!(
            "mutant_core={default_level},mutant_storage={default_level},mutant={default_level}"
        );
        let filter =
            EnvFilter::try_from_env("MUTANT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .init();
    });
}
