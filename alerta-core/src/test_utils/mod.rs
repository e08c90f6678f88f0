// File: alerta-core/src/test_utils/mod.rs
//
// In-memory fakes and fixtures shared by the integration tests.

pub mod fixtures;
pub mod memory;

pub use fixtures::{sample_alert, sample_new_alert};
pub use memory::{MemoryAlertRepo, MemoryChatRepo};

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install an env-filtered subscriber once per test binary so service
/// logs show up under `RUST_LOG=debug` without double-init panics.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
