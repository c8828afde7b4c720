//! Literal accumulation
//!
//! Plain text is buffered until a construct that flushes it. Comments and
//! includes do not flush, so a buffered literal may span them; its location
//! then runs from the first buffered character to the flush point.

use std::sync::Arc;

use super::listener::ParserEvent;
use crate::chars;
use crate::parse_util::{Location, SourceText};

#[derive(Debug, Default)]
pub struct LiteralAccumulator {
    buffer: String,
    start: Option<usize>,
    /// One-shot: drop the next flushed literal if it is whitespace only.
    ignore_next_whitespace: bool,
}

impl LiteralAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer `text`, which begins at byte offset `offset`.
    pub fn append(&mut self, offset: usize, text: &str) {
        if self.start.is_none() {
            self.start = Some(offset);
        }
        self.buffer.push_str(text);
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    pub fn ignore_next_whitespace(&mut self) {
        self.ignore_next_whitespace = true;
    }

    /// Emit the buffered text as a literal ending at `end`.
    ///
    /// The suppression flag is consumed by every flush, including one with
    /// nothing buffered.
    pub fn flush(&mut self, end: usize, source: &Arc<SourceText>) -> Option<ParserEvent> {
        let Some(start) = self.start.take() else {
            self.ignore_next_whitespace = false;
            return None;
        };
        let text = std::mem::take(&mut self.buffer);

        if std::mem::take(&mut self.ignore_next_whitespace) && chars::is_whitespace_str(&text) {
            return None;
        }

        Some(ParserEvent::Literal {
            location: Location::new(source.clone(), start, end),
            text,
        })
    }
}
