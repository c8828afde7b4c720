//! Version
//!
//! Version information for the command line tools.

/// CLI version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
