//! Property-based tests for the markup parser.
//!
//! Random documents built from markup fragments check that the scan always
//! terminates, that event locations stay inside the document, and that
//! events tile the input in order.

#[path = "util/mod.rs"]
mod utils;

use proptest::prelude::*;
use utils::parse_source;
use webforms_compiler::ParserEvent;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Fragments that never form a code block, comment, include or server script.
fn arb_plain_fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("text"),
        Just(" "),
        Just("\n"),
        Just("é"),
        Just("&amp;"),
        Just("<"),
        Just(">"),
        Just("</"),
        Just("<b>"),
        Just("</b>"),
        Just("<br/>"),
        Just(r#"<a href="u">"#),
        Just("<input checked value=x>"),
        Just(r#"<asp:Label runat="server" Text="t" />"#),
        Just("<script>"),
        Just("</script>"),
    ]
}

/// Adds code blocks, directives and server scripts to the plain fragments.
fn arb_fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        3 => arb_plain_fragment(),
        1 => prop_oneof![
            Just("<% x %>"),
            Just("<%= y %>"),
            Just("<%: z %>"),
            Just("<%# w %>"),
            Just("<%#: v %>"),
            Just(r#"<%@ Page A="1" %>"#),
            Just(r#"<div title="<%# q %>">"#),
            Just(r#"<script runat="server">"#),
            Just("<%"),
            Just("<%@"),
            Just("%>"),
        ],
    ]
}

fn arb_document(fragment: impl Strategy<Value = &'static str>) -> impl Strategy<Value = String> {
    prop::collection::vec(fragment, 0..24).prop_map(|parts| parts.concat())
}

// ============================================================================
// Helpers
// ============================================================================

fn non_error_spans(events: &[ParserEvent]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter(|event| !event.is_error())
        .map(|event| (event.location().start(), event.location().end()))
        .collect()
}

fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any input terminates and every location is a valid slice of it.
    #[test]
    fn locations_stay_inside_document(input in ".{0,200}") {
        let result = parse_source(&input);
        for event in &result.events {
            let location = event.location();
            prop_assert!(location.start() <= location.end());
            prop_assert!(location.end() <= input.len());
            prop_assert!(input.is_char_boundary(location.start()));
            prop_assert!(input.is_char_boundary(location.end()));
        }
    }

    /// Without comments or includes, events come in document order, never
    /// overlap, and only suppressed whitespace falls between them.
    #[test]
    fn events_tile_the_document(input in arb_document(arb_fragment())) {
        let result = parse_source(&input);
        let spans = non_error_spans(&result.events);

        let mut cursor = 0;
        for &(start, end) in &spans {
            prop_assert!(start >= cursor, "overlap at {} in {:?}", start, input);
            prop_assert!(is_blank(&input[cursor..start]), "dropped text in {:?}", input);
            cursor = end;
        }
        if !result.has_errors() {
            prop_assert!(is_blank(&input[cursor..]), "dropped tail in {:?}", input);
        }

        for event in &result.events {
            if let ParserEvent::Literal { location, text } = event {
                prop_assert_eq!(location.text(), text.as_str());
            }
        }
    }

    /// With nothing that suppresses or drops text, the covered spans
    /// reassemble the input exactly.
    #[test]
    fn spans_reassemble_plain_documents(input in arb_document(arb_plain_fragment())) {
        let result = parse_source(&input);

        let rebuilt: String = result
            .events
            .iter()
            .filter(|event| !event.is_error())
            .map(|event| event.location().text())
            .collect();
        prop_assert_eq!(rebuilt, input);
    }
}
