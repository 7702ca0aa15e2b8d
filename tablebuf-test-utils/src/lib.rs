use std::sync::Once;

pub mod scripted;

pub use scripted::{MemQueryer, ScriptedCursor, ScriptedResultSet};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            Err(_) => EnvFilter::new("info"),
        };
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    // Runs at binary init time so individual tests need not call init.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}
