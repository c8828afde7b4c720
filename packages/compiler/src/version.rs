//! Version Information

/// Crate version, as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
