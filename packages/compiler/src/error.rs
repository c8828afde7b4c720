//! Crate-level errors.
//!
//! Markup problems are never fatal to the parser; they are reported as
//! [`ParseError`] diagnostics. `CompilerError` covers what happens around a
//! parse: loading the document and strict validation of the outcome.

use std::path::PathBuf;

use thiserror::Error;

use crate::parse_util::ParseError;

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} error(s) while parsing {source_name}: {}", errors.len(), summarize(errors))]
    Parse {
        source_name: String,
        errors: Vec<ParseError>,
    },
}

fn summarize(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CompilerError>;
