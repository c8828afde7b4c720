//! Attribute tables for tags and directives
//!
//! Attribute names are compared case-insensitively. `id` and `runat` never
//! land in the table: they are lifted into dedicated fields because the
//! control builder treats them specially.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::entities::decode_html;
use super::matchers::RawAttribute;

const ID_ATTRIBUTE: &str = "id";
const RUNAT_ATTRIBUTE: &str = "runat";
const RUNAT_SERVER: &str = "server";

/// Ordered, case-insensitive attribute map.
///
/// Keys are folded to lower case for lookup; the name as written is kept
/// alongside the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    entries: IndexMap<String, (String, String)>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_lowercase()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::key(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&Self::key(name))
            .map(|(_, value)| value.as_str())
    }

    /// Insert unless an entry with the same (case-insensitive) name exists.
    ///
    /// Returns `false` and leaves the table untouched on a duplicate.
    pub fn try_insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let key = Self::key(&name);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, (name, value.into()));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name as written, value)` pairs in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Serialize for AttributeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Attributes of one tag or directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagAttributes {
    pub id: Option<String>,
    pub is_run_at_server: bool,
    pub table: AttributeTable,
}

impl TagAttributes {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up an ordinary attribute. `id` and `runat` have their own fields.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.table.get(name)
    }
}

/// Outcome of turning raw captures into [`TagAttributes`].
#[derive(Debug, Default)]
pub struct ProcessedAttributes {
    pub attributes: TagAttributes,
    /// Set when the first directive attribute had no `=`.
    pub directive_name: Option<String>,
    /// Names of attributes dropped because they were already present.
    pub duplicates: Vec<String>,
}

/// Build the attribute set of a tag (`is_directive == false`) or directive.
///
/// Values are HTML-decoded. For directives, a leading attribute written
/// without `=` is the directive name and is not stored.
pub fn process_attributes(raw: &[RawAttribute<'_>], is_directive: bool) -> ProcessedAttributes {
    let mut processed = ProcessedAttributes::default();

    for (index, attr) in raw.iter().enumerate() {
        if is_directive && index == 0 && !attr.has_equals {
            processed.directive_name = Some(attr.name.to_string());
            continue;
        }

        let value = decode_html(attr.value);

        if attr.name.eq_ignore_ascii_case(ID_ATTRIBUTE) {
            processed.attributes.id = Some(value.into_owned());
        } else if attr.name.eq_ignore_ascii_case(RUNAT_ATTRIBUTE) {
            processed.attributes.is_run_at_server = value.eq_ignore_ascii_case(RUNAT_SERVER);
        } else if !processed.attributes.table.try_insert(attr.name, value) {
            processed.duplicates.push(attr.name.to_string());
        }
    }

    processed
}

/// Message reported for a duplicated attribute
pub fn duplicate_attribute_message(name: &str) -> String {
    format!("Duplicated tag attribute '{}'.", name)
}
