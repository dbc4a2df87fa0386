//! Shared helpers for renderq's integration tests.
//!
//! - [`builders`]: descriptor files and in-memory job records
//! - [`fake_executor`]: an `ExecutorBackend` that never spawns processes
//! - [`recording_sink`]: a `JobEventSink` that keeps every event

pub mod builders;
pub mod fake_executor;
pub mod recording_sink;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING: Once = Once::new();

/// Per-test log capture, installed once per test binary.
///
/// Output only shows for failing tests unless run with `--nocapture`.
/// The level comes from `RENDERQ_LOG`, falling back to `info`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("RENDERQ_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `fut`, failing the test if it takes longer than five seconds.
pub async fn with_timeout<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("test timed out after 5 seconds")
}
