//! Minimized inputs that once looked crash-prone: unclosed markers, bare
//! delimiters, separator lines with nothing above them. Both directions must
//! stay total on every one of them.

use md2jira::{jira_to_markdown, markdown_to_jira};

const CASES: &[(&str, &str)] = &[
    ("empty", ""),
    ("lone newline", "\n"),
    ("crlf only", "\r\n\r\n"),
    ("nul bytes", "\u{0}\u{0}"),
    ("bom heading", "\u{feff}# bom"),
    ("bare hash", "#"),
    ("six hashes", "######"),
    ("seven hashes", "####### overflow"),
    ("bare fence", "```"),
    ("adjacent fences", "```\n```"),
    ("unclosed code macro", "{code"),
    ("lone code macro", "{code}"),
    ("empty hint", "{code:}"),
    ("hint with params", "{code:x|title=y}"),
    ("lone header marker", "||"),
    ("separator first line", "| -"),
    ("separator only table", "| - | - |\n| -"),
    ("open bracket", "["),
    ("empty brackets", "[]"),
    ("empty link", "[|]"),
    ("unclosed link", "[a|b"),
    ("unclosed image", "![]("),
    ("bare tildes", "~~"),
    ("quad tildes", "~~~~"),
    ("rule only", "---"),
    ("lone dash", "-"),
    ("lone star", "*"),
    ("empty bold pair", "** **"),
    ("lone underscores", "__"),
    ("lone cite marker", "??"),
    ("lone carets", "^^"),
    ("spaced plus", "+ +"),
    ("open braces", "{{"),
    ("empty braces", "{{}}"),
    ("unclosed braces", "{{x"),
    ("unclosed script", "[<script>x](http://e.com)"),
    ("quote marker only", "> "),
    ("deep quote markers", ">>>"),
    ("tab bullet", "\t- x"),
    ("ragged list", "- \n-\n - "),
];

fn run_both(input: &str) {
    let _ = markdown_to_jira(input);
    let _ = jira_to_markdown(input);
}

#[test]
fn minimized_inputs_never_panic() {
    let mut failures = Vec::new();

    for (name, input) in CASES {
        // catch panic so we can say which case caused it.
        let result = std::panic::catch_unwind(|| run_both(input));

        if let Err(panic_payload) = result {
            // extract a useful panic message when possible
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_string()
            };

            failures.push(format!("{name} panicked: {msg}"));
        }
    }

    assert!(
        failures.is_empty(),
        "conversion panicked on one or more minimized inputs:\n{}",
        failures.join("\n")
    );
}

#[test]
fn huge_single_line_converts() {
    let src = "a".repeat(100_000);
    assert_eq!(markdown_to_jira(&src), src);
    assert_eq!(jira_to_markdown(&src), src);
}

#[test]
fn separator_with_non_table_line_above_is_kept() {
    // the header rewrite must only fire when the previous line is a table
    // row; anything else would corrupt ordinary prose.
    let src = "plain text\n| -";
    assert_eq!(markdown_to_jira(src), "plain text\n| -");
}
