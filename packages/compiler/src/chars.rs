/*
 * Character Codes
 *
 * Character constants and classes shared by the markup matchers.
 */

//! Character constants used throughout the compiler

pub const NEWLINE: char = '\n';

// Punctuation
pub const DQ: char = '"';
pub const HASH: char = '#';
pub const PERCENT: char = '%';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const UNDERSCORE: char = '_';

/// Check if character is whitespace (`\s`)
pub fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

/// Check if character is a word character (`\w`)
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == UNDERSCORE
}

/// Tag names: `[\w:.]`
pub fn is_tag_name_char(ch: char) -> bool {
    is_word_char(ch) || ch == COLON || ch == PERIOD
}

/// Attribute names after the first character: `[-\w:]`
pub fn is_attr_name_char(ch: char) -> bool {
    is_word_char(ch) || ch == MINUS || ch == COLON
}

/// Directive attribute names after the first character: `[\w:]`
pub fn is_directive_name_char(ch: char) -> bool {
    is_word_char(ch) || ch == COLON
}

/// True when every character of `s` is whitespace (also true for "")
pub fn is_whitespace_str(s: &str) -> bool {
    s.chars().all(is_whitespace)
}
