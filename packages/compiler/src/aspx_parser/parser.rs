//! Markup parser engine
//!
//! A single forward scan over the document. At each position the matchers
//! are tried in priority order and the first one that matches decides what
//! happens; if it matches nothing, or its construct is rejected, one char
//! joins the pending literal and the scan moves on.

use std::ops::Range;
use std::sync::Arc;

use smallvec::SmallVec;

use super::attributes::{duplicate_attribute_message, process_attributes, TagAttributes};
use super::listener::{CodeBlock, EventCollector, ParseResult, ParserEvent, ParserEventListener};
use super::literal::LiteralAccumulator;
use super::matchers::{MatchKind, Matcher, RawAttribute, TokenMatch, DEFAULT_ORDER, SCRIPT_ORDER};
use super::tokens::{CodeBlockType, IncludePathType, TagType};
use crate::chars;
use crate::parse_util::{Location, SourceText};

const SCRIPT_TAG: &str = "script";
const ESCAPED_CODE_END: &str = "%\\>";
const CODE_END: &str = "%>";
const CODE_START: &str = "<%";

const INVALID_INCLUDE_PATH_TYPE: &str = "Invalid server include path type.";
const UNEXPECTED_EOF_IN_SCRIPT: &str = "Unexpected end of file while processing tag 'script'.";

/// Parse a document and collect every event.
pub fn parse(source: Arc<SourceText>) -> ParseResult {
    let mut collector = EventCollector::new();
    AspxParser::new(source).parse(&mut collector);
    collector.into_result()
}

/// Parses one document. Consumed by [`AspxParser::parse`].
pub struct AspxParser {
    source: Arc<SourceText>,
}

/// Mutable scan state, owned by a single `parse` call.
#[derive(Debug, Default)]
struct ScanState {
    pos: usize,
    literal: LiteralAccumulator,
    /// Location of the open `<script runat="server">` while inside its body
    script: Option<Location>,
}

/// What a handler did with a match.
#[derive(Debug, Default)]
struct Outcome {
    consumed: bool,
    events: SmallVec<[ParserEvent; 2]>,
}

impl Outcome {
    fn consumed() -> Self {
        Outcome {
            consumed: true,
            events: SmallVec::new(),
        }
    }

    fn rejected() -> Self {
        Outcome::default()
    }

    fn emit(mut self, event: impl Into<Option<ParserEvent>>) -> Self {
        self.events.extend(event.into());
        self
    }
}

impl AspxParser {
    pub fn new(source: Arc<SourceText>) -> Self {
        AspxParser { source }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(
        source = %self.source.name(),
        len = self.source.len(),
    ))]
    pub fn parse<L: ParserEventListener + ?Sized>(self, listener: &mut L) {
        let source = self.source.clone();
        let text = source.content();
        // Open tags are only tried before the last '>' of the document.
        let last_gt = text.rfind(chars::GT);

        let mut state = ScanState::default();
        let mut emitted = 0usize;

        while state.pos < text.len() {
            let order: &[Matcher] = if state.script.is_some() {
                &SCRIPT_ORDER
            } else {
                &DEFAULT_ORDER
            };

            let found = order.iter().find_map(|&matcher| {
                if matcher == Matcher::OpenTag && !last_gt.is_some_and(|gt| state.pos < gt) {
                    return None;
                }
                matcher.try_match(text, state.pos)
            });

            let mut advanced = false;
            if let Some(token) = found {
                let end = token.range.end;
                let outcome = self.handle(&mut state, token);
                emitted += outcome.events.len();
                for event in outcome.events {
                    event.dispatch(listener);
                }
                if outcome.consumed {
                    state.pos = end;
                    advanced = true;
                }
            }

            if !advanced {
                let Some(ch) = text[state.pos..].chars().next() else {
                    break;
                };
                let next = state.pos + ch.len_utf8();
                state.literal.append(state.pos, &text[state.pos..next]);
                state.pos = next;
            }
        }

        match state.script.take() {
            Some(script) => {
                emitted += 1;
                ParserEvent::Error {
                    location: script,
                    message: UNEXPECTED_EOF_IN_SCRIPT.to_string(),
                }
                .dispatch(listener);
            }
            None => {
                if let Some(event) = state.literal.flush(text.len(), &self.source) {
                    emitted += 1;
                    event.dispatch(listener);
                }
            }
        }

        tracing::debug!(events = emitted, "parse complete");
    }

    fn location(&self, range: Range<usize>) -> Location {
        Location::new(self.source.clone(), range.start, range.end)
    }

    fn handle(&self, state: &mut ScanState, token: TokenMatch<'_>) -> Outcome {
        let range = token.range;
        match token.kind {
            MatchKind::Text => {
                state
                    .literal
                    .append(range.start, &self.source.content()[range.clone()]);
                Outcome::consumed()
            }
            MatchKind::Directive { attributes } => self.directive(state, range, &attributes),
            MatchKind::Include { path_type, path } => self.include(range, path_type, path),
            MatchKind::Comment => Outcome::consumed().emit(ParserEvent::Comment {
                location: self.location(range.clone()),
                text: self.source.content()[range].to_string(),
            }),
            MatchKind::CodeBlock { kind, code, encode } => {
                self.code_block(state, range, kind, code, encode)
            }
            MatchKind::OpenTag {
                name,
                attributes,
                self_closing,
            } => self.open_tag(state, range, name, &attributes, self_closing),
            MatchKind::CloseTag { name } => self.close_tag(state, range, name),
        }
    }

    fn directive(
        &self,
        state: &mut ScanState,
        range: Range<usize>,
        raw: &[RawAttribute<'_>],
    ) -> Outcome {
        let location = self.location(range.clone());
        let mut outcome = Outcome::consumed().emit(state.literal.flush(range.start, &self.source));

        let processed = process_attributes(raw, true);
        for name in &processed.duplicates {
            outcome = outcome.emit(ParserEvent::Error {
                location: location.clone(),
                message: duplicate_attribute_message(name),
            });
        }

        state.literal.ignore_next_whitespace();
        outcome.emit(ParserEvent::Directive {
            location,
            name: processed.directive_name.unwrap_or_default(),
            attributes: processed.attributes,
        })
    }

    // The pending literal is deliberately left alone here.
    fn include(&self, range: Range<usize>, path_type: &str, path: &str) -> Outcome {
        let location = self.location(range);
        let event = match IncludePathType::from_keyword(path_type) {
            Some(path_type) => ParserEvent::Include {
                location,
                path_type,
                path: path.to_string(),
            },
            None => ParserEvent::Error {
                location,
                message: INVALID_INCLUDE_PATH_TYPE.to_string(),
            },
        };
        Outcome::consumed().emit(event)
    }

    fn code_block(
        &self,
        state: &mut ScanState,
        range: Range<usize>,
        kind: CodeBlockType,
        code: Range<usize>,
        encode: bool,
    ) -> Outcome {
        let raw = &self.source.content()[code.clone()];
        let trimmed = raw.trim();
        let code_start = code.start + (raw.len() - raw.trim_start().len());
        let code_location = self.location(code_start..code_start + trimmed.len());

        let outcome = Outcome::consumed().emit(state.literal.flush(range.start, &self.source));
        if kind == CodeBlockType::Code {
            state.literal.ignore_next_whitespace();
        }

        outcome.emit(ParserEvent::CodeBlock {
            location: self.location(range),
            code_block: CodeBlock {
                kind,
                code: trimmed.replace(ESCAPED_CODE_END, CODE_END),
                code_location,
                encode,
            },
        })
    }

    fn open_tag(
        &self,
        state: &mut ScanState,
        range: Range<usize>,
        name: &str,
        raw: &[RawAttribute<'_>],
        self_closing: bool,
    ) -> Outcome {
        let location = self.location(range.clone());
        let processed = process_attributes(raw, false);

        // Duplicates are reported even if the tag is then rejected.
        let mut outcome = Outcome::rejected();
        for duplicate in &processed.duplicates {
            outcome = outcome.emit(ParserEvent::Error {
                location: location.clone(),
                message: duplicate_attribute_message(duplicate),
            });
        }

        let attributes = processed.attributes;
        if !attributes.is_run_at_server
            && raw
                .iter()
                .any(|attr| attr.value.contains(CODE_START) && attr.value.contains(CODE_END))
        {
            tracing::trace!(
                tag = name,
                offset = range.start,
                "inline code in client tag attribute, reading as text"
            );
            return outcome;
        }

        outcome.consumed = true;
        outcome = outcome.emit(state.literal.flush(range.start, &self.source));

        if attributes.is_run_at_server && !self_closing && name.eq_ignore_ascii_case(SCRIPT_TAG) {
            state.script = Some(location.clone());
        }

        let tag_type = if self_closing {
            TagType::SelfClosing
        } else {
            TagType::Open
        };
        outcome.emit(ParserEvent::Tag {
            location,
            tag_type,
            name: name.to_string(),
            attributes,
        })
    }

    fn close_tag(&self, state: &mut ScanState, range: Range<usize>, name: &str) -> Outcome {
        if state.script.is_some() {
            if !name.eq_ignore_ascii_case(SCRIPT_TAG) {
                tracing::trace!(
                    tag = name,
                    offset = range.start,
                    "close tag inside server script, reading as text"
                );
                return Outcome::rejected();
            }
            state.script = None;
        }

        Outcome::consumed()
            .emit(state.literal.flush(range.start, &self.source))
            .emit(ParserEvent::Tag {
                location: self.location(range),
                tag_type: TagType::Close,
                name: name.to_string(),
                attributes: TagAttributes::empty(),
            })
    }
}
