/**
 * Attribute Table Tests
 *
 * Attribute extraction for tags and directives as seen through parser events.
 */

#[path = "util/mod.rs"]
mod utils;

#[cfg(test)]
mod attribute_tests {
    use super::utils::*;
    use pretty_assertions::assert_eq;
    use webforms_compiler::ParserEvent;

    fn first_tag_attributes(input: &str) -> webforms_compiler::aspx_parser::TagAttributes {
        parse_source(input)
            .events
            .into_iter()
            .find_map(|event| match event {
                ParserEvent::Tag { attributes, .. } => Some(attributes),
                _ => None,
            })
            .expect("no tag event")
    }

    mod extraction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_lift_id_and_runat_out_of_table() {
            let attributes = first_tag_attributes(r#"<tag a="1" b="2" runat="server" id="x"/>"#);
            assert_eq!(attributes.id.as_deref(), Some("x"));
            assert!(attributes.is_run_at_server);
            assert_eq!(
                attributes.table.iter().collect::<Vec<_>>(),
                vec![("a", "1"), ("b", "2")]
            );
            assert!(!attributes.table.contains("id"));
            assert!(!attributes.table.contains("runat"));
        }

        #[test]
        fn should_look_up_names_case_insensitively() {
            let attributes = first_tag_attributes(r#"<asp:TextBox MaxLength="10" runat="server">"#);
            assert_eq!(attributes.get("maxlength"), Some("10"));
            assert_eq!(attributes.get("MAXLENGTH"), Some("10"));
        }

        #[test]
        fn should_recognize_runat_in_any_case() {
            assert_eq!(
                parse_and_humanize(r#"<div RunAt="Server">"#),
                vec![row(&["TAG", "Open", "div", "runat=server"])]
            );
            assert_eq!(
                parse_and_humanize(r#"<div runat="client">"#),
                vec![row(&["TAG", "Open", "div"])]
            );
        }

        #[test]
        fn should_decode_values() {
            assert_eq!(
                parse_and_humanize(r#"<a title="Fish &amp; Chips" data-x="&lt;b&gt;">"#),
                vec![row(&["TAG", "Open", "a", "title=Fish & Chips", "data-x=<b>"])]
            );
        }

        #[test]
        fn should_accept_every_value_form() {
            assert_eq!(
                parse_and_humanize("<input type=checkbox checked value='on'>"),
                vec![row(&[
                    "TAG",
                    "Open",
                    "input",
                    "type=checkbox",
                    "checked=",
                    "value=on"
                ])]
            );
        }

        #[test]
        fn should_accept_prefixed_attribute_names() {
            assert_eq!(
                parse_and_humanize(r#"<asp:Label meta:resourcekey="lbl" runat="server" />"#),
                vec![row(&[
                    "TAG",
                    "SelfClosing",
                    "asp:Label",
                    "runat=server",
                    "meta:resourcekey=lbl"
                ])]
            );
        }

        #[test]
        fn should_give_trailing_slash_to_tag_end() {
            assert_eq!(
                parse_and_humanize("<a href=/x/>"),
                vec![row(&["TAG", "SelfClosing", "a", "href=/x"])]
            );
            assert_eq!(
                parse_and_humanize("<a href=/x/ >"),
                vec![row(&["TAG", "Open", "a", "href=/x/"])]
            );
        }

        #[test]
        fn should_keep_bare_data_binding_value_verbatim() {
            assert_eq!(
                parse_and_humanize(r#"<asp:Label runat=server Text=<%# Eval("Name") %> />"#),
                vec![row(&[
                    "TAG",
                    "SelfClosing",
                    "asp:Label",
                    "runat=server",
                    r#"Text=<%# Eval("Name") %>"#
                ])]
            );
        }

        #[test]
        fn should_lift_id_from_directives() {
            assert_eq!(
                parse_and_humanize(r#"<%@ Control ID="c1" Language="C#" %>"#),
                vec![row(&["DIRECTIVE", "Control", "id=c1", "Language=C#"])]
            );
        }
    }

    mod duplicates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_keep_first_and_report_once() {
            let result = parse_source(r#"<tag a="1" a="2"/>"#);
            assert_eq!(
                humanize_events(&result.events),
                vec![
                    row(&["ERROR", "Duplicated tag attribute 'a'."]),
                    row(&["TAG", "SelfClosing", "tag", "a=1"]),
                ]
            );
            assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].msg.contains("'a'"));
        }

        #[test]
        fn should_compare_names_case_insensitively() {
            assert_eq!(
                parse_and_humanize(r#"<tag Title="1" TITLE="2">"#),
                vec![
                    row(&["ERROR", "Duplicated tag attribute 'TITLE'."]),
                    row(&["TAG", "Open", "tag", "Title=1"]),
                ]
            );
        }

        #[test]
        fn should_point_error_at_whole_tag() {
            assert_eq!(
                parse_and_humanize_source_spans(r#"x<tag a="1" a="2"/>"#),
                vec![
                    row(&["ERROR", r#"<tag a="1" a="2"/>"#]),
                    row(&["LITERAL", "x"]),
                    row(&["TAG", r#"<tag a="1" a="2"/>"#]),
                ]
            );
        }

        #[test]
        fn should_report_even_when_tag_is_rejected() {
            assert_eq!(
                parse_and_humanize(r#"<div a="1" a="<%= x %>">"#),
                vec![
                    row(&["ERROR", "Duplicated tag attribute 'a'."]),
                    row(&["LITERAL", r#"<div a="1" a=""#]),
                    row(&["CODE_BLOCK", "Expression", "x"]),
                    row(&["LITERAL", r#"">"#]),
                ]
            );
        }

        #[test]
        fn should_report_directive_duplicates() {
            assert_eq!(
                parse_and_humanize(r#"<%@ Page Title="a" title="b" %>"#),
                vec![
                    row(&["ERROR", "Duplicated tag attribute 'title'."]),
                    row(&["DIRECTIVE", "Page", "Title=a"]),
                ]
            );
        }

        #[test]
        fn should_not_treat_repeated_id_as_duplicate() {
            assert_eq!(
                parse_and_humanize(r#"<a id="1" ID="2">"#),
                vec![row(&["TAG", "Open", "a", "id=2"])]
            );
        }
    }
}
