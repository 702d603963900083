//! Cross-direction properties: what must survive a full conversion cycle.

use md2jira::{
    ConvertOptions, jira_to_markdown, jira_to_markdown_with_options, markdown_to_jira,
    markdown_to_jira_with_options,
};

#[test]
fn code_block_contents_survive_a_round_trip() {
    // fence bodies carry markup that the rules would otherwise rewrite; the
    // cycle must reproduce them byte for byte.
    let body = "# H\n| Option |\n| --- | --- |\n**b**\n- item";
    let md = format!("```\n{body}\n```");

    let jira = markdown_to_jira(&md);
    assert_eq!(jira, format!("{{code}}\n{body}\n{{code}}"));

    let back = jira_to_markdown(&jira);
    assert_eq!(back, md);
}

#[test]
fn hinted_code_block_round_trips_through_a_known_language() {
    let md = "```java\nint x;\n```";
    let jira = markdown_to_jira(md);
    assert_eq!(jira, "{code:java}\nint x;\n{code}");
    assert_eq!(jira_to_markdown(&jira), md);
}

#[test]
fn heading_conversion_is_pinned_both_directions() {
    // the directions are not byte inverses: the blank after the marker is
    // dropped going out and not reinserted coming back.
    let jira = markdown_to_jira("# Title");
    assert_eq!(jira, "h1.Title");

    let md = jira_to_markdown(&jira);
    assert_eq!(md, "#Title");

    // the cycle is stable from here on.
    assert_eq!(markdown_to_jira(&md), "h1.Title");
}

#[test]
fn list_depth_is_monotonic_in_indent() {
    let md = "- a\n  - b\n    - c\n      - d";
    let jira = markdown_to_jira(md);
    assert_eq!(jira, "* a\n** b\n*** c\n**** d");

    // with the same indent unit the cycle is exact.
    assert_eq!(jira_to_markdown(&jira), md);
}

#[test]
fn list_depth_round_trips_at_other_indent_units() {
    let opts = ConvertOptions {
        indent_unit: 4,
        ..ConvertOptions::default()
    };
    let md = "- a\n    - b\n        - c";
    let jira = markdown_to_jira_with_options(md, &opts);
    assert_eq!(jira, "* a\n** b\n*** c");
    assert_eq!(jira_to_markdown_with_options(&jira, &opts), md);
}

#[test]
fn table_header_round_trips() {
    let md = "| Option | Description |\n| --- | --- |\n| a | b |";
    let jira = markdown_to_jira(md);
    assert_eq!(jira, "|| Option || Description ||\n| a | b |");

    // coming back, a two-column separator is resynthesized below the header.
    assert_eq!(jira_to_markdown(&jira), md);
}

#[test]
fn language_hints_normalize_via_the_bundled_table() {
    let jira = markdown_to_jira("```TypeScript\nlet x;\n```");
    assert_eq!(jira, "{code:javascript}\nlet x;\n{code}");

    let jira = markdown_to_jira("```xyz\n?\n```");
    assert_eq!(jira, "{code:none}\n?\n{code}");
}

#[test]
fn link_text_is_sanitized_end_to_end() {
    let jira = markdown_to_jira("[<script>x</script>](http://e.com)");
    assert_eq!(jira, "[|http://e.com]");

    // the stripped link still parses coming back.
    assert_eq!(jira_to_markdown(&jira), "[](http://e.com)");
}

#[test]
fn malformed_input_never_fails() {
    // unterminated fence: treated as plain text, rules still run.
    assert_eq!(markdown_to_jira("```\nanything"), "```\nanything");
    assert_eq!(jira_to_markdown("{code:rust\nx"), "{code:rust\nx");

    // empty input.
    assert_eq!(markdown_to_jira(""), "");
    assert_eq!(jira_to_markdown(""), "");

    // separator lines with nothing to attach to.
    assert_eq!(markdown_to_jira("| -"), "| -");
    assert_eq!(markdown_to_jira("| - | - |\n| -"), "|| - || - ||");
    assert_eq!(jira_to_markdown("| - | - |"), "| - | - |");
}
