/**
 * Server Script Region Tests
 *
 * Inside `<script runat="server">` only text, includes, comments and close
 * tags are recognized.
 */

#[path = "util/mod.rs"]
mod utils;

#[cfg(test)]
mod script_region_tests {
    use super::utils::*;
    use pretty_assertions::assert_eq;

    const UNEXPECTED_EOF: &str = "Unexpected end of file while processing tag 'script'.";

    mod body {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_read_code_blocks_as_literal() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server"><%# x %></script>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["LITERAL", "<%# x %>"]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }

        #[test]
        fn should_not_close_on_other_tags() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server">a</notscript>b</script>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["LITERAL", "a</notscript>b"]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }

        #[test]
        fn should_not_open_tags() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server">if (a<b) { x = "<p>"; }</script>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["LITERAL", r#"if (a<b) { x = "<p>"; }"#]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }

        #[test]
        fn should_read_directives_as_literal() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server"><%@ Page %></script>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["LITERAL", "<%@ Page %>"]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }

        #[test]
        fn should_still_match_comments() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server">a<%-- c --%>b</script>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["COMMENT", "<%-- c --%>"]),
                    row(&["LITERAL", "ab"]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }

        #[test]
        fn should_still_match_includes() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server">a<!--#include file="f.inc"-->b</script>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["INCLUDE", "Absolute", "f.inc"]),
                    row(&["LITERAL", "ab"]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }
    }

    mod boundaries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_match_script_name_case_insensitively() {
            assert_eq!(
                parse_and_humanize(r#"<SCRIPT runat="server">x</Script>"#),
                vec![
                    row(&["TAG", "Open", "SCRIPT", "runat=server"]),
                    row(&["LITERAL", "x"]),
                    row(&["TAG", "Close", "Script"]),
                ]
            );
        }

        #[test]
        fn should_ignore_client_scripts() {
            assert_eq!(
                parse_and_humanize(r#"<script type="text/javascript"><%= x %></script>"#),
                vec![
                    row(&["TAG", "Open", "script", "type=text/javascript"]),
                    row(&["CODE_BLOCK", "Expression", "x"]),
                    row(&["TAG", "Close", "script"]),
                ]
            );
        }

        #[test]
        fn should_not_enter_region_for_self_closing_script() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server" src="a.cs" /><%= x %>"#),
                vec![
                    row(&["TAG", "SelfClosing", "script", "runat=server", "src=a.cs"]),
                    row(&["CODE_BLOCK", "Expression", "x"]),
                ]
            );
        }

        #[test]
        fn should_resume_normal_scanning_after_region() {
            assert_eq!(
                parse_and_humanize(r#"<script runat="server">x</script><%= y %>"#),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["LITERAL", "x"]),
                    row(&["TAG", "Close", "script"]),
                    row(&["CODE_BLOCK", "Expression", "y"]),
                ]
            );
        }
    }

    mod unterminated {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_report_one_error_at_end_of_input() {
            let result = parse_source(r#"<script runat="server">void F() {}"#);
            assert_eq!(
                humanize_events(&result.events),
                vec![
                    row(&["TAG", "Open", "script", "runat=server"]),
                    row(&["ERROR", UNEXPECTED_EOF]),
                ]
            );
            assert_eq!(result.errors.len(), 1);
        }

        #[test]
        fn should_point_error_at_script_tag() {
            assert_eq!(
                parse_and_humanize_source_spans("<p>\n<script runat=\"server\">x"),
                vec![
                    row(&["TAG", "<p>"]),
                    row(&["LITERAL", "\n"]),
                    row(&["TAG", r#"<script runat="server">"#]),
                    row(&["ERROR", r#"<script runat="server">"#]),
                ]
            );
        }
    }
}
