//! Construct kinds reported by the markup parser

use serde::Serialize;

/// Flavours of `<% %>` blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CodeBlockType {
    /// `<% code %>`
    Code,
    /// `<%= expr %>`
    Expression,
    /// `<%: expr %>`
    EncodedExpression,
    /// `<%# expr %>` or `<%#: expr %>`
    DataBinding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TagType {
    Open,
    SelfClosing,
    Close,
}

/// How the path of a `<!--#include -->` is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IncludePathType {
    /// `file="..."`, relative to the including document
    Absolute,
    /// `virtual="..."`, relative to the application root
    Virtual,
}

impl IncludePathType {
    /// Case-insensitive lookup of the keyword written in the include.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("file") {
            Some(IncludePathType::Absolute)
        } else if keyword.eq_ignore_ascii_case("virtual") {
            Some(IncludePathType::Virtual)
        } else {
            None
        }
    }
}
