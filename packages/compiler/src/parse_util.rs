//! Parse Utilities
//!
//! Source documents, locations inside them and the diagnostics that point at
//! those locations.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::chars;
use crate::error::{CompilerError, Result};

/// A named, immutable document.
///
/// Shared through `Arc` so every [`Location`] can point back at it.
#[derive(Debug)]
pub struct SourceText {
    name: String,
    content: String,
    line_starts: OnceCell<Vec<usize>>,
}

impl SourceText {
    pub fn new(content: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(SourceText {
            name: name.into(),
            content: content.into(),
            line_starts: OnceCell::new(),
        })
    }

    /// Read a document from disk, naming it after its path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CompilerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(content, path.display().to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn line_starts(&self) -> &[usize] {
        self.line_starts.get_or_init(|| {
            std::iter::once(0)
                .chain(
                    self.content
                        .char_indices()
                        .filter(|&(_, ch)| ch == chars::NEWLINE)
                        .map(|(i, _)| i + 1),
                )
                .collect()
        })
    }

    /// Zero-based line and column (in chars) of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the document.
    pub fn line_col(&self, offset: usize) -> LinePosition {
        let offset = offset.min(self.content.len());
        let starts = self.line_starts();
        let line = match starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = starts[line];
        let col = self
            .content
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - line_start);
        LinePosition { line, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinePosition {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Half-open byte range `[start, end)` inside a [`SourceText`].
#[derive(Clone)]
pub struct Location {
    source: Arc<SourceText>,
    start: usize,
    end: usize,
}

impl Location {
    pub fn new(source: Arc<SourceText>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= source.len());
        Location { source, start, end }
    }

    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered source text
    pub fn text(&self) -> &str {
        &self.source.content()[self.start..self.end]
    }

    pub fn start_position(&self) -> LinePosition {
        self.source.line_col(self.start)
    }

    pub fn end_position(&self) -> LinePosition {
        self.source.line_col(self.end)
    }

    /// Return the source around the start of the location.
    /// Up to `max_chars` or `max_lines` on each side.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> (String, String) {
        let content = self.source.content();

        let mut before_start = self.start;
        let mut ctx_lines = 0;
        for (taken, (i, ch)) in content[..self.start].char_indices().rev().enumerate() {
            if taken >= max_chars {
                break;
            }
            before_start = i;
            if ch == chars::NEWLINE {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        let mut after_end = self.start;
        ctx_lines = 0;
        for (taken, (i, ch)) in content[self.start..].char_indices().enumerate() {
            if taken >= max_chars {
                break;
            }
            after_end = self.start + i + ch.len_utf8();
            if ch == chars::NEWLINE {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        (
            content[before_start..self.start].to_string(),
            content[self.start..after_end].to_string(),
        )
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Location {}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{})", self.source.name(), self.start, self.end)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.source.name(), self.start_position())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Location", 3)?;
        state.serialize_field("source", self.source.name())?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub location: Location,
    pub msg: String,
}

impl ParseError {
    pub fn new(location: Location, msg: impl Into<String>) -> Self {
        ParseError {
            location,
            msg: msg.into(),
        }
    }

    pub fn contextual_message(&self) -> String {
        let (before, after) = self.location.get_context(100, 3);
        format!("{} (\"{}[ERROR ->]{}\")", self.msg, before, after)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg, self.location)
    }
}
