#![deny(clippy::all)]

/**
 * Web Forms Markup Compiler
 *
 * Front end for `.aspx` / `.ascx` documents: source handling, diagnostics
 * and the markup parser that feeds control tree builders.
 */

pub mod chars;
pub mod error;
pub mod parse_util;
mod version;

pub mod aspx_parser;

// Re-exports
pub use aspx_parser::{parse, AspxParser, EventCollector, ParseResult, ParserEvent, ParserEventListener};
pub use error::{CompilerError, Result};
pub use parse_util::{Location, ParseError, SourceText};
pub use version::VERSION;
