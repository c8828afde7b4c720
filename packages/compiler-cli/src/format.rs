//! Output formats for `aspxc`

use std::fmt::Write as _;
use std::str::FromStr;

use indexmap::IndexMap;
use webforms_compiler::aspx_parser::TagAttributes;
use webforms_compiler::{ParseError, ParserEvent};

use crate::perform_parse::DocumentReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per event
    #[default]
    Text,
    /// A JSON array of events per document
    Json,
    /// Event counts per document
    Summary,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["text", "json", "summary"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "summary" => Ok(OutputFormat::Summary),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

pub fn format_report(report: &DocumentReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => format_text(&report.result.events),
        OutputFormat::Json => format_json(&report.result.events)?,
        OutputFormat::Summary => format_summary(report),
    })
}

fn push_attributes(out: &mut String, attributes: &TagAttributes) {
    if let Some(id) = &attributes.id {
        let _ = write!(out, " id={:?}", id);
    }
    if attributes.is_run_at_server {
        out.push_str(" runat=\"server\"");
    }
    for (name, value) in attributes.table.iter() {
        let _ = write!(out, " {}={:?}", name, value);
    }
}

/// `<line>:<col> <KIND> <payload>` per event, with 1-based positions.
pub fn format_text(events: &[ParserEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let position = event.location().start_position();
        let _ = write!(
            out,
            "{}:{} {}",
            position.line + 1,
            position.col + 1,
            event.kind_name()
        );
        match event {
            ParserEvent::Error { message, .. } => {
                let _ = write!(out, " {}", message);
            }
            ParserEvent::Comment { text, .. } | ParserEvent::Literal { text, .. } => {
                let _ = write!(out, " {:?}", text);
            }
            ParserEvent::Include {
                path_type, path, ..
            } => {
                let _ = write!(out, " {:?} {:?}", path_type, path);
            }
            ParserEvent::Directive {
                name, attributes, ..
            } => {
                let _ = write!(out, " {}", name);
                push_attributes(&mut out, attributes);
            }
            ParserEvent::CodeBlock { code_block, .. } => {
                let _ = write!(out, " {:?} {:?}", code_block.kind, code_block.code);
                if code_block.encode {
                    out.push_str(" encode");
                }
            }
            ParserEvent::Tag {
                tag_type,
                name,
                attributes,
                ..
            } => {
                let _ = write!(out, " {:?} {}", tag_type, name);
                push_attributes(&mut out, attributes);
            }
        }
        out.push('\n');
    }
    out
}

pub fn format_json(events: &[ParserEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

/// `<path>: <n> events (<KIND> <count>, ...), <e> error(s)`
pub fn format_summary(report: &DocumentReport) -> String {
    let mut counts: IndexMap<&'static str, usize> = IndexMap::new();
    for event in &report.result.events {
        *counts.entry(event.kind_name()).or_default() += 1;
    }
    let kinds = counts
        .iter()
        .map(|(kind, count)| format!("{} {}", kind, count))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}: {} events ({}), {} error(s)\n",
        report.path.display(),
        report.result.events.len(),
        kinds,
        report.result.errors.len()
    )
}

/// Diagnostics with surrounding source, one block per error.
pub fn format_diagnostics(errors: &[ParseError]) -> String {
    let mut out = String::new();
    for error in errors {
        let _ = writeln!(out, "error: {}", error);
        let _ = writeln!(out, "  {}", error.contextual_message());
    }
    out
}
