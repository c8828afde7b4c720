//! Token matchers
//!
//! Each matcher recognises one construct starting exactly at a given byte
//! offset. Fixed-delimiter constructs use anchored regular expressions; tags
//! and directives carry repeated attribute captures and are scanned by hand.
//!
//! The `regex` crate runs in time linear in the haystack and the scanners
//! never backtrack more than one attribute value, so no match can blow up on
//! adversarial input.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use smallvec::SmallVec;

use super::tokens::CodeBlockType;
use crate::chars;

static TEXT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^<]+").unwrap());

static INCLUDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<!--\s*#(?i:include)\s*(?P<pathtype>\w+)\s*=\s*["']?(?P<filename>[^"']*?)["']?\s*-->"#,
    )
    .unwrap()
});

// `<%--` up to the first `-%>` that is preceded by at least one more `-`
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<%--(?:[^-]*-)*?-%>").unwrap());

static EXPRESSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<%=(?P<code>(?s:.*?))%>").unwrap());

static ENCODED_EXPRESSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<%:(?P<code>(?s:.*?))%>").unwrap());

static DATABINDING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<%#(?P<encode>:)?(?P<code>(?s:.*?))%>").unwrap());

static CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<%(?P<code>(?s:.*?))%>").unwrap());

/// One `name[=value]` pair as written in the source.
///
/// `value` is the raw text between the quotes (or the bare token); it has not
/// been HTML-decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute<'s> {
    pub name: &'s str,
    pub value: &'s str,
    pub has_equals: bool,
}

pub type RawAttributes<'s> = SmallVec<[RawAttribute<'s>; 8]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind<'s> {
    Text,
    Directive {
        attributes: RawAttributes<'s>,
    },
    Include {
        path_type: &'s str,
        path: &'s str,
    },
    Comment,
    CodeBlock {
        kind: CodeBlockType,
        /// Byte range of the text between the delimiters
        code: Range<usize>,
        encode: bool,
    },
    OpenTag {
        name: &'s str,
        attributes: RawAttributes<'s>,
        self_closing: bool,
    },
    CloseTag {
        name: &'s str,
    },
}

/// A successful match: the consumed byte range and its captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch<'s> {
    pub range: Range<usize>,
    pub kind: MatchKind<'s>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matcher {
    Text,
    Directive,
    Include,
    Comment,
    Expression,
    EncodedExpression,
    DataBinding,
    Code,
    OpenTag,
    CloseTag,
}

/// Trial order outside a server script block.
pub const DEFAULT_ORDER: [Matcher; 10] = [
    Matcher::Text,
    Matcher::Directive,
    Matcher::Include,
    Matcher::Comment,
    Matcher::Expression,
    Matcher::EncodedExpression,
    Matcher::DataBinding,
    Matcher::Code,
    Matcher::OpenTag,
    Matcher::CloseTag,
];

/// Trial order inside `<script runat="server">`.
pub const SCRIPT_ORDER: [Matcher; 4] = [
    Matcher::Text,
    Matcher::Include,
    Matcher::Comment,
    Matcher::CloseTag,
];

impl Matcher {
    /// Try to match at byte offset `pos` of `text`.
    ///
    /// `pos` must be a char boundary.
    pub fn try_match<'s>(self, text: &'s str, pos: usize) -> Option<TokenMatch<'s>> {
        match self {
            Matcher::Text => match_regex(&TEXT_REGEX, text, pos, |_| Some(MatchKind::Text)),
            Matcher::Directive => match_directive(text, pos),
            Matcher::Include => match_regex(&INCLUDE_REGEX, text, pos, |caps| {
                Some(MatchKind::Include {
                    path_type: caps.name("pathtype")?.as_str(),
                    path: caps.name("filename")?.as_str(),
                })
            }),
            Matcher::Comment => {
                match_regex(&COMMENT_REGEX, text, pos, |_| Some(MatchKind::Comment))
            }
            Matcher::Expression => {
                match_code_block(&EXPRESSION_REGEX, CodeBlockType::Expression, text, pos)
            }
            Matcher::EncodedExpression => match_code_block(
                &ENCODED_EXPRESSION_REGEX,
                CodeBlockType::EncodedExpression,
                text,
                pos,
            ),
            Matcher::DataBinding => {
                match_code_block(&DATABINDING_REGEX, CodeBlockType::DataBinding, text, pos)
            }
            Matcher::Code => {
                if text[pos..].starts_with("<%@") {
                    return None;
                }
                match_code_block(&CODE_REGEX, CodeBlockType::Code, text, pos)
            }
            Matcher::OpenTag => match_open_tag(text, pos),
            Matcher::CloseTag => match_close_tag(text, pos),
        }
    }
}

fn match_regex<'s>(
    regex: &Regex,
    text: &'s str,
    pos: usize,
    kind: impl FnOnce(&Captures<'s>) -> Option<MatchKind<'s>>,
) -> Option<TokenMatch<'s>> {
    let caps = regex.captures(&text[pos..])?;
    let whole = caps.get(0)?;
    Some(TokenMatch {
        range: pos..pos + whole.end(),
        kind: kind(&caps)?,
    })
}

fn match_code_block<'s>(
    regex: &Regex,
    kind: CodeBlockType,
    text: &'s str,
    pos: usize,
) -> Option<TokenMatch<'s>> {
    match_regex(regex, text, pos, |caps| {
        let code = caps.name("code")?;
        Some(MatchKind::CodeBlock {
            kind,
            code: pos + code.start()..pos + code.end(),
            encode: caps.name("encode").is_some(),
        })
    })
}

/// Byte cursor over the document for the hand-written scanners.
struct Cursor<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn new(text: &'s str, pos: usize) -> Self {
        Cursor { text, pos }
    }

    fn rest(&self) -> &'s str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map_or(self.rest().len(), |(i, _)| i);
        self.pos += len;
        &self.text[start..self.pos]
    }

    /// Returns how many bytes of whitespace were skipped.
    fn skip_whitespace(&mut self) -> usize {
        self.take_while(chars::is_whitespace).len()
    }

    fn starts_with_word_char(&self) -> bool {
        self.peek().is_some_and(chars::is_word_char)
    }

    /// Consume a value quoted with `quote`, returning the inner text.
    fn quoted(&mut self, quote: char) -> Option<&'s str> {
        if !self.eat(quote) {
            return None;
        }
        let rest = self.rest();
        let close = rest.find(quote)?;
        self.pos += close + quote.len_utf8();
        Some(&rest[..close])
    }
}

/// `<%@ name[=value] ... %>`
fn match_directive(text: &str, pos: usize) -> Option<TokenMatch<'_>> {
    let mut cur = Cursor::new(text, pos);
    if !cur.eat_str("<%@") {
        return None;
    }

    let mut attributes = RawAttributes::new();
    loop {
        let save = cur.pos;
        cur.skip_whitespace();
        if !cur.starts_with_word_char() {
            cur.pos = save;
            break;
        }

        let name_start = cur.pos;
        cur.bump();
        cur.take_while(chars::is_directive_name_char);
        let name = &text[name_start..cur.pos];
        if cur.at_end() {
            return None;
        }

        let after_name = cur.pos;
        cur.skip_whitespace();
        if cur.eat(chars::EQ) {
            cur.skip_whitespace();
            let value = match cur.peek() {
                Some(quote @ (chars::DQ | chars::SQ)) => cur.quoted(quote)?,
                _ => cur.take_while(|ch| {
                    !chars::is_whitespace(ch)
                        && !matches!(ch, chars::DQ | chars::SQ | chars::PERCENT | chars::GT)
                }),
            };
            attributes.push(RawAttribute {
                name,
                value,
                has_equals: true,
            });
        } else {
            cur.pos = after_name;
            attributes.push(RawAttribute {
                name,
                value: "",
                has_equals: false,
            });
        }
    }

    cur.skip_whitespace();
    if !cur.eat_str("%>") {
        return None;
    }

    Some(TokenMatch {
        range: pos..cur.pos,
        kind: MatchKind::Directive { attributes },
    })
}

/// `</name>`, with optional whitespace before the `>`.
///
/// Shares the tag-name class with [`match_open_tag`] so that every name a
/// close tag accepts can also be opened.
fn match_close_tag(text: &str, pos: usize) -> Option<TokenMatch<'_>> {
    let mut cur = Cursor::new(text, pos);
    if !cur.eat_str("</") {
        return None;
    }
    let name = cur.take_while(chars::is_tag_name_char);
    if name.is_empty() {
        return None;
    }
    cur.skip_whitespace();
    if !cur.eat(chars::GT) {
        return None;
    }
    Some(TokenMatch {
        range: pos..cur.pos,
        kind: MatchKind::CloseTag { name },
    })
}

/// `<name attr="v" attr='v' attr=<%# expr %> attr=v attr ... /?>`
fn match_open_tag(text: &str, pos: usize) -> Option<TokenMatch<'_>> {
    let mut cur = Cursor::new(text, pos);
    if !cur.eat(chars::LT) {
        return None;
    }
    let name = cur.take_while(chars::is_tag_name_char);
    if name.is_empty() {
        return None;
    }

    let mut attributes = RawAttributes::new();
    loop {
        let save = cur.pos;
        if cur.skip_whitespace() == 0 || !cur.starts_with_word_char() {
            cur.pos = save;
            break;
        }

        let name_start = cur.pos;
        cur.bump();
        cur.take_while(chars::is_attr_name_char);
        let attr_name = &text[name_start..cur.pos];

        let after_name = cur.pos;
        cur.skip_whitespace();
        if cur.eat(chars::EQ) {
            cur.skip_whitespace();
            let value = tag_attribute_value(&mut cur);
            attributes.push(RawAttribute {
                name: attr_name,
                value,
                has_equals: true,
            });
        } else {
            cur.pos = after_name;
            attributes.push(RawAttribute {
                name: attr_name,
                value: "",
                has_equals: false,
            });
        }
    }

    cur.skip_whitespace();
    let self_closing = cur.eat(chars::SLASH);
    if !cur.eat(chars::GT) {
        return None;
    }

    Some(TokenMatch {
        range: pos..cur.pos,
        kind: MatchKind::OpenTag {
            name,
            attributes,
            self_closing,
        },
    })
}

/// Scan a tag attribute value positioned just after `=` and any whitespace.
///
/// Delimited forms (quotes, `<%# %>`) only count when the tag can continue
/// right after them; otherwise the value is re-read as a bare token.
fn tag_attribute_value<'s>(cur: &mut Cursor<'s>) -> &'s str {
    let start = cur.pos;

    let delimited = match cur.peek() {
        Some(quote @ (chars::DQ | chars::SQ)) => cur.quoted(quote),
        Some(chars::LT) if cur.rest().starts_with("<%#") => {
            let rest = cur.rest();
            rest[3..].find("%>").map(|close| {
                let value = &rest[..3 + close + 2];
                cur.pos += value.len();
                value
            })
        }
        _ => None,
    };
    if let Some(value) = delimited {
        if can_continue_tag(cur.rest()) {
            return value;
        }
    }

    cur.pos = start;
    let value =
        cur.take_while(|ch| !chars::is_whitespace(ch) && ch != chars::EQ && ch != chars::GT);
    // A trailing '/' right before '>' closes the tag instead.
    if value.ends_with(chars::SLASH) && cur.peek() == Some(chars::GT) {
        cur.pos -= 1;
        return &value[..value.len() - 1];
    }
    value
}

fn can_continue_tag(rest: &str) -> bool {
    match rest.chars().next() {
        Some(ch) if chars::is_whitespace(ch) => true,
        Some(chars::GT) => true,
        Some(chars::SLASH) => rest[1..].starts_with(chars::GT),
        _ => false,
    }
}
