//! Test utilities for linkcat
//!
//! Shared by unit tests and the integration suite (through the `test-utils`
//! feature): once-only logging setup and an on-disk project fixture.

pub mod project;

pub use project::TestProject;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG`. Without either, nothing is
/// installed. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=linkcat=trace cargo test resolver
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
