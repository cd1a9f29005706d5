pub mod builders;
pub mod fake_notifier;

use std::sync::{Arc, Once};

use jobdag::api::ControlPlane;
use jobdag::exec::Notifier;
use jobdag::store::TableStore;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Control plane over a fresh in-memory store, with no executor attached.
pub fn memory_plane() -> ControlPlane {
    ControlPlane::new(Arc::new(TableStore::in_memory()), None)
}

/// Control plane over a fresh in-memory store, wired to `notifier`.
pub fn memory_plane_with(notifier: Arc<dyn Notifier>) -> ControlPlane {
    ControlPlane::new(Arc::new(TableStore::in_memory()), Some(notifier))
}
