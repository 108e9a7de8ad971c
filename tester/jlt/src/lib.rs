//! The Javalette submission tester.
//!
//! Wires command-line parsing, submission preparation and the test harness
//! into a single session. See [`session::execute`].

pub mod cli;
pub mod session;

pub use cli::{Cli, ColorChoice};
pub use session::{execute, SessionError};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=jlt_harness=debug` or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}
