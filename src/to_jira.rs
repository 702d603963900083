//! Markdown -> Jira rewrite pipeline.
//!
//! Fenced code blocks are lifted first, then the rules below run in a fixed
//! order over the remaining text, then the table pass fixes header rows and
//! the blocks are substituted back with resolved language hints. Every rule
//! is a pure `(text) -> text` function; the order is load-bearing and each
//! rule's doc comment names the neighbors it depends on.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ConvertOptions;
use crate::lang;
use crate::protect;
use crate::table;

/// Compiled patterns for this direction, built once on first use.
struct Patterns {
    image: Regex,
    horizontal_rule: Regex,
    block_quote: Regex,
    heading: Regex,
    emphasis: Regex,
    list_item: Regex,
    span_tags: Vec<(Regex, &'static str)>,
    strikethrough: Regex,
    inline_code: Regex,
    link: Regex,
    autolink: Regex,
    script_element: Regex,
    style_element: Regex,
    html_tag: Regex,
}

static RE: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    image: Regex::new(r"!\[[^\]\n]*\]\(([^)\n]+)\)").unwrap(),
    horizontal_rule: Regex::new(r"(?m)^(?:---|___|\*\*\*)$").unwrap(),
    block_quote: Regex::new(r"(?m)^>[\s>]* (.*)$").unwrap(),
    heading: Regex::new(r"(?m)^(#{1,6})[ \t]*(.*)$").unwrap(),
    emphasis: Regex::new(
        r"\*\*\*(.+?)\*\*\*|___(.+?)___|\*\*(.+?)\*\*|__(.+?)__|\*([^*\n]+?)\*|_([^_\n]+?)_",
    )
    .unwrap(),
    list_item: Regex::new(r"(?m)^([ \t]*)-[ \t](.*)$").unwrap(),
    span_tags: [
        ("cite", "??"),
        ("del", "-"),
        ("ins", "+"),
        ("sup", "^"),
        ("sub", "~"),
    ]
    .into_iter()
    .map(|(tag, wrap)| {
        let re = Regex::new(&format!("<{tag}>(.*?)</{tag}>")).unwrap();
        (re, wrap)
    })
    .collect(),
    strikethrough: Regex::new(r"~~(.*?)~~").unwrap(),
    inline_code: Regex::new(r"`([^`\n]+)`").unwrap(),
    link: Regex::new(r"\[([^\]\n]*)\]\(([^)\n]+)\)").unwrap(),
    autolink: Regex::new(r"<([a-zA-Z][a-zA-Z0-9+.-]*:[^>\s]+)>").unwrap(),
    script_element: Regex::new(r"(?i)<script\b[^>]*>.*?</script>").unwrap(),
    style_element: Regex::new(r"(?i)<style\b[^>]*>.*?</style>").unwrap(),
    html_tag: Regex::new(r"<[^>]*>").unwrap(),
});

/// Rewrite steps in application order. Changing this order changes meaning;
/// each function documents the neighbors it must run before or after.
const RULES: &[fn(&str, &ConvertOptions) -> String] = &[
    rewrite_images,
    rewrite_horizontal_rules,
    rewrite_block_quotes,
    rewrite_headings,
    rewrite_emphasis,
    rewrite_lists,
    rewrite_inline_spans,
    rewrite_strikethrough,
    rewrite_inline_code,
    rewrite_links,
];

/// Convert Markdown text to Jira wiki markup.
pub fn convert(input: &str, opts: &ConvertOptions) -> String {
    let text = crate::normalize_newlines(input);
    protect::lift_markdown(&text)
        .map_text(|segment| {
            let mut out = segment.to_string();
            for rule in RULES {
                out = rule(&out, opts);
            }
            table::markdown_separators_to_jira(&out)
        })
        .restore_jira(|hint| lang::supported_name(hint).to_string())
}

/// `![alt](url)` to `!url!`. Jira's image syntax has no caption slot, so the
/// alt text is dropped. Must run before `rewrite_links`, which would
/// otherwise claim the `[alt](url)` tail.
fn rewrite_images(text: &str, _opts: &ConvertOptions) -> String {
    RE.image.replace_all(text, "!$1!").into_owned()
}

/// A line consisting solely of `---`, `___` or `***` becomes Jira's `----`.
fn rewrite_horizontal_rules(text: &str, _opts: &ConvertOptions) -> String {
    RE.horizontal_rule.replace_all(text, "----").into_owned()
}

/// `> quoted` lines are wrapped in `{quote}` markers, one pair per quoted
/// line, with the leading `>` run stripped.
fn rewrite_block_quotes(text: &str, _opts: &ConvertOptions) -> String {
    RE.block_quote
        .replace_all(text, "{quote}\n$1\n{quote}")
        .into_owned()
}

/// `#` runs of length 1-6 become `h{n}.`; the blanks between the run and the
/// title are dropped, so `# Title` maps to `h1.Title`.
fn rewrite_headings(text: &str, _opts: &ConvertOptions) -> String {
    RE.heading
        .replace_all(text, |caps: &Captures| {
            format!("h{}.{}", caps[1].len(), &caps[2])
        })
        .into_owned()
}

/// Emphasis wrappers: a symmetric run of one `*` or `_` becomes italic
/// `_c_`, runs of two or three become bold `*c*`. Asymmetric or empty
/// wrappers pass through. Must run before `rewrite_lists`, whose output
/// introduces `*` runs at line starts, and before `rewrite_inline_spans`
/// and `rewrite_strikethrough`, which give `-` and `~` other meanings.
fn rewrite_emphasis(text: &str, _opts: &ConvertOptions) -> String {
    RE.emphasis
        .replace_all(text, |caps: &Captures| {
            // groups 5 and 6 are the single-character wrappers.
            if let Some(inner) = caps.get(5).or_else(|| caps.get(6)) {
                format!("_{}_", inner.as_str())
            } else {
                let inner = (1..=4).find_map(|i| caps.get(i)).map_or("", |m| m.as_str());
                format!("*{inner}*")
            }
        })
        .into_owned()
}

/// `- item` lines become `*` bullet runs. Depth is the indent width divided
/// by the configured unit, plus one; a tab counts as one unit.
fn rewrite_lists(text: &str, opts: &ConvertOptions) -> String {
    // a zero unit would divide by zero; clamp rather than fail.
    let unit = opts.indent_unit.max(1);
    RE.list_item
        .replace_all(text, |caps: &Captures| {
            let width: usize = caps[1]
                .chars()
                .map(|c| if c == '\t' { unit } else { 1 })
                .sum();
            let depth = width / unit + 1;
            format!("{} {}", "*".repeat(depth), &caps[2])
        })
        .into_owned()
}

/// `<cite>`, `<del>`, `<ins>`, `<sup>`, `<sub>` pairs become Jira's wrapper
/// characters (`??`, `-`, `+`, `^`, `~`). Unpaired tags pass through.
fn rewrite_inline_spans(text: &str, _opts: &ConvertOptions) -> String {
    let mut out = text.to_string();
    for (re, wrap) in &RE.span_tags {
        out = re
            .replace_all(&out, format!("{wrap}${{1}}{wrap}").as_str())
            .into_owned();
    }
    out
}

/// `~~gone~~` to `-gone-`. Runs after `rewrite_inline_spans`: this pattern
/// needs doubled tildes, so it can never consume the single-tilde wrappers
/// that rule emits for `<sub>`.
fn rewrite_strikethrough(text: &str, _opts: &ConvertOptions) -> String {
    RE.strikethrough.replace_all(text, "-$1-").into_owned()
}

/// Backtick spans become `{{...}}` macros. Only fenced blocks are protected,
/// so earlier rules have already run inside the span; that loss is pinned by
/// a test rather than prevented.
fn rewrite_inline_code(text: &str, _opts: &ConvertOptions) -> String {
    RE.inline_code.replace_all(text, "{{$1}}").into_owned()
}

/// `[text](url)` to `[text|url]` with sanitized text, then `<scheme:...>`
/// autolinks to `[url]`. Requiring a scheme keeps leftover HTML tags (an
/// unpaired `<del>`, say) from turning into links. Runs last so it sees the
/// other rules' output rather than their input.
fn rewrite_links(text: &str, _opts: &ConvertOptions) -> String {
    let out = RE
        .link
        .replace_all(text, |caps: &Captures| {
            format!("[{}|{}]", sanitize_link_text(&caps[1]), &caps[2])
        })
        .into_owned();
    RE.autolink.replace_all(&out, "[$1]").into_owned()
}

/// Strip brackets and markup from link text: `<script>`/`<style>` elements
/// drop with their contents, remaining tags drop keeping their inner text,
/// and HTML entities are decoded last.
fn sanitize_link_text(text: &str) -> String {
    let cleaned = text.replace(['[', ']'], "");
    let cleaned = RE.script_element.replace_all(&cleaned, "");
    let cleaned = RE.style_element.replace_all(&cleaned, "");
    let cleaned = RE.html_tag.replace_all(&cleaned, "");
    html_escape::decode_html_entities(&cleaned).into_owned()
}
