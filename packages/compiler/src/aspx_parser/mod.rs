//! Web Forms markup parser
//!
//! Turns a page or user control document into an ordered stream of syntax
//! events: literals, tags, directives, code blocks, comments and includes.

pub mod attributes;
pub mod entities;
pub mod listener;
pub mod literal;
pub mod matchers;
pub mod parser;
pub mod tokens;

pub use attributes::{AttributeTable, TagAttributes};
pub use entities::decode_html;
pub use listener::{CodeBlock, EventCollector, ParseResult, ParserEvent, ParserEventListener};
pub use parser::{parse, AspxParser};
pub use tokens::{CodeBlockType, IncludePathType, TagType};
