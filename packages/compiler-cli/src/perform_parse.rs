//! Perform Parse
//!
//! Loads and parses a batch of documents. Documents are independent, so the
//! batch is spread over the rayon pool; results keep the input order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use webforms_compiler::{parse, ParseResult, SourceText};

/// Exit status when every document was read and accepted.
pub const EXIT_OK: i32 = 0;
/// Exit status in strict mode when some document reported diagnostics.
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// Exit status when a document could not be read.
pub const EXIT_IO_FAILURE: i32 = 2;

/// One parsed document.
#[derive(Debug)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub result: ParseResult,
}

pub fn parse_document(path: &Path) -> webforms_compiler::Result<DocumentReport> {
    let source = SourceText::from_path(path)?;
    let result = parse(source);
    tracing::debug!(
        path = %path.display(),
        events = result.events.len(),
        errors = result.errors.len(),
        "parsed document"
    );
    Ok(DocumentReport {
        path: path.to_path_buf(),
        result,
    })
}

pub fn parse_documents(paths: &[PathBuf]) -> Vec<webforms_compiler::Result<DocumentReport>> {
    paths.par_iter().map(|path| parse_document(path)).collect()
}

/// Process exit status for a finished batch.
///
/// Read failures win over diagnostics; diagnostics only count in strict mode.
pub fn exit_code_from_reports(
    reports: &[webforms_compiler::Result<DocumentReport>],
    strict: bool,
) -> i32 {
    if reports.iter().any(|report| report.is_err()) {
        EXIT_IO_FAILURE
    } else if strict
        && reports
            .iter()
            .flatten()
            .any(|report| report.result.has_errors())
    {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_OK
    }
}
