#![deny(clippy::all)]

/**
 * Web Forms Compiler CLI
 *
 * Command line front end over the markup parser
 */
// Re-export compiler for convenience
pub use webforms_compiler as compiler;

pub mod format;
pub mod perform_parse;
pub mod version;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber.
///
/// Filtered by `RUST_LOG`, `warn` when unset. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

/// CLI version
pub fn version() -> &'static str {
    version::VERSION
}
