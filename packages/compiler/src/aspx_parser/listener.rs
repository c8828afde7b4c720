//! Parser output
//!
//! [`ParserEventListener`] is the callback contract the engine drives.
//! [`ParserEvent`] is the same contract as a value, which is what the engine
//! produces internally and what [`EventCollector`] records.

use serde::Serialize;

use super::attributes::TagAttributes;
use super::tokens::{CodeBlockType, IncludePathType, TagType};
use crate::error::{CompilerError, Result};
use crate::parse_util::{Location, ParseError};

/// Payload of a `<% %>`-family construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub kind: CodeBlockType,
    /// Inner text, trimmed, with `%\>` unescaped to `%>`
    pub code: String,
    /// Span of the trimmed inner text
    pub code_location: Location,
    /// Only meaningful for `<%#: %>`
    pub encode: bool,
}

/// Receives syntax events in document order.
pub trait ParserEventListener {
    fn on_error(&mut self, location: Location, message: String);

    /// `text` includes the `<%--` and `--%>` delimiters.
    fn on_comment(&mut self, location: Location, text: String);

    fn on_literal(&mut self, location: Location, text: String);

    fn on_include(&mut self, location: Location, path_type: IncludePathType, path: String);

    /// `name` is empty when the directive does not start with a bare name.
    fn on_directive(&mut self, location: Location, name: String, attributes: TagAttributes);

    fn on_code_block(&mut self, location: Location, code_block: CodeBlock);

    fn on_tag(
        &mut self,
        location: Location,
        tag_type: TagType,
        name: String,
        attributes: TagAttributes,
    );
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ParserEvent {
    Error {
        location: Location,
        message: String,
    },
    Comment {
        location: Location,
        text: String,
    },
    Literal {
        location: Location,
        text: String,
    },
    Include {
        location: Location,
        path_type: IncludePathType,
        path: String,
    },
    Directive {
        location: Location,
        name: String,
        attributes: TagAttributes,
    },
    CodeBlock {
        location: Location,
        code_block: CodeBlock,
    },
    Tag {
        location: Location,
        tag_type: TagType,
        name: String,
        attributes: TagAttributes,
    },
}

impl ParserEvent {
    pub fn location(&self) -> &Location {
        match self {
            ParserEvent::Error { location, .. }
            | ParserEvent::Comment { location, .. }
            | ParserEvent::Literal { location, .. }
            | ParserEvent::Include { location, .. }
            | ParserEvent::Directive { location, .. }
            | ParserEvent::CodeBlock { location, .. }
            | ParserEvent::Tag { location, .. } => location,
        }
    }

    /// Short upper-case label, used by dumps and summaries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParserEvent::Error { .. } => "ERROR",
            ParserEvent::Comment { .. } => "COMMENT",
            ParserEvent::Literal { .. } => "LITERAL",
            ParserEvent::Include { .. } => "INCLUDE",
            ParserEvent::Directive { .. } => "DIRECTIVE",
            ParserEvent::CodeBlock { .. } => "CODE_BLOCK",
            ParserEvent::Tag { .. } => "TAG",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ParserEvent::Error { .. })
    }

    /// Forward this event to the matching listener callback.
    pub fn dispatch<L: ParserEventListener + ?Sized>(self, listener: &mut L) {
        match self {
            ParserEvent::Error { location, message } => listener.on_error(location, message),
            ParserEvent::Comment { location, text } => listener.on_comment(location, text),
            ParserEvent::Literal { location, text } => listener.on_literal(location, text),
            ParserEvent::Include {
                location,
                path_type,
                path,
            } => listener.on_include(location, path_type, path),
            ParserEvent::Directive {
                location,
                name,
                attributes,
            } => listener.on_directive(location, name, attributes),
            ParserEvent::CodeBlock {
                location,
                code_block,
            } => listener.on_code_block(location, code_block),
            ParserEvent::Tag {
                location,
                tag_type,
                name,
                attributes,
            } => listener.on_tag(location, tag_type, name, attributes),
        }
    }
}

/// Listener that keeps every event in order.
#[derive(Debug, Default)]
pub struct EventCollector {
    pub events: Vec<ParserEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_result(self) -> ParseResult {
        ParseResult::new(self.events)
    }
}

impl ParserEventListener for EventCollector {
    fn on_error(&mut self, location: Location, message: String) {
        self.events.push(ParserEvent::Error { location, message });
    }

    fn on_comment(&mut self, location: Location, text: String) {
        self.events.push(ParserEvent::Comment { location, text });
    }

    fn on_literal(&mut self, location: Location, text: String) {
        self.events.push(ParserEvent::Literal { location, text });
    }

    fn on_include(&mut self, location: Location, path_type: IncludePathType, path: String) {
        self.events.push(ParserEvent::Include {
            location,
            path_type,
            path,
        });
    }

    fn on_directive(&mut self, location: Location, name: String, attributes: TagAttributes) {
        self.events.push(ParserEvent::Directive {
            location,
            name,
            attributes,
        });
    }

    fn on_code_block(&mut self, location: Location, code_block: CodeBlock) {
        self.events.push(ParserEvent::CodeBlock {
            location,
            code_block,
        });
    }

    fn on_tag(
        &mut self,
        location: Location,
        tag_type: TagType,
        name: String,
        attributes: TagAttributes,
    ) {
        self.events.push(ParserEvent::Tag {
            location,
            tag_type,
            name,
            attributes,
        });
    }
}

/// Parse result
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub events: Vec<ParserEvent>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn new(events: Vec<ParserEvent>) -> Self {
        let errors = events
            .iter()
            .filter_map(|event| match event {
                ParserEvent::Error { location, message } => {
                    Some(ParseError::new(location.clone(), message.clone()))
                }
                _ => None,
            })
            .collect();
        ParseResult { events, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Strict mode: fail if any diagnostic was reported.
    pub fn ensure_no_errors(&self) -> Result<()> {
        match self.errors.first() {
            None => Ok(()),
            Some(first) => Err(CompilerError::Parse {
                source_name: first.location.source().name().to_string(),
                errors: self.errors.clone(),
            }),
        }
    }
}
