//! Jira -> Markdown rewrite pipeline.
//!
//! This direction overlaps more than the other one: `*` opens both bold and
//! bullets, `-` opens both strikethrough and dashes in prose, `~` opens both
//! subscript and the strikethrough output. Ordering alone cannot untangle
//! that, so after the heading pass each line is classified (list or plain)
//! and the inline rules run over content only, with word-character guards on
//! the emphasis wrappers and a whole-token rule for strikethrough.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ConvertOptions;
use crate::lang;
use crate::protect;
use crate::table;

/// Compiled patterns for this direction, built once on first use.
struct Patterns {
    heading: Regex,
    list_item: Regex,
    cite: Regex,
    ins: Regex,
    sup: Regex,
    sub: Regex,
    bold: Regex,
    italic: Regex,
    strike_token: Regex,
    inline_code: Regex,
    link: Regex,
    bare_bracket: Regex,
}

static RE: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    heading: Regex::new(r"(?m)^h([1-6])\.(.*)$").unwrap(),
    list_item: Regex::new(r"^(\*+)[ \t](.*)$").unwrap(),
    cite: Regex::new(r"(?:^|([^\w?]))\?\?(\w(?:[^?\n]*\w)?)\?\?").unwrap(),
    ins: Regex::new(r"(?:^|([^\w+]))\+(\w(?:[^+\n]*\w)?)\+").unwrap(),
    sup: Regex::new(r"\^(\w[^\s^]*\w|\w)\^").unwrap(),
    sub: Regex::new(r"~(\w[^\s~]*\w|\w)~").unwrap(),
    bold: Regex::new(r"(?:^|([^\w*]))\*(\w(?:[^*\n]*\w)?)\*").unwrap(),
    italic: Regex::new(r"(?:^|([^\w_]))_(\w(?:[^_\n]*\w)?)_").unwrap(),
    strike_token: Regex::new(r"^-(\w(?:.*\w)?)-$").unwrap(),
    inline_code: Regex::new(r"\{\{([^{}\n]+)\}\}").unwrap(),
    link: Regex::new(r"\[([^|\]\n]*)\|([^|\]\n]+)(?:\|[^\]\n]*)?\]").unwrap(),
    bare_bracket: Regex::new(r"\[([^\]\n]+)\](\()?").unwrap(),
});

/// Inline rewrite steps in application order, applied per line after list
/// classification. `rewrite_special_spans` must run before
/// `rewrite_strikethrough`: the subscript pattern would otherwise tear into
/// the doubled tildes strikethrough emits. Bold must run before italic so
/// italic's `*` output is never re-wrapped.
const INLINE_RULES: &[fn(&str) -> String] = &[
    rewrite_special_spans,
    rewrite_bold,
    rewrite_italic,
    rewrite_strikethrough,
    rewrite_inline_code,
    rewrite_links,
];

/// Convert Jira wiki markup to Markdown text.
pub fn convert(input: &str, opts: &ConvertOptions) -> String {
    let text = crate::normalize_newlines(input);
    protect::lift_jira(&text)
        .map_text(|segment| {
            let headed = rewrite_headings(segment);
            let lines = rewrite_lines(&headed, opts);
            table::jira_headers_to_markdown(&lines)
        })
        .restore_markdown(|hint| lang::supported_name(hint).to_string())
}

/// `h{n}.` prefixes become `#` runs. The digit is bounded at 1-6, so `h7.`
/// is not a heading. No blank is inserted after the run; whatever spacing
/// the source carried is kept as-is.
fn rewrite_headings(text: &str) -> String {
    RE.heading
        .replace_all(text, |caps: &Captures| {
            let level: usize = caps[1].parse().unwrap_or(1);
            format!("{}{}", "#".repeat(level), &caps[2])
        })
        .into_owned()
}

/// Classify each line, then run the inline rules over its content. Bullet
/// runs are consumed here, before any emphasis pattern can mistake them for
/// bold markers.
fn rewrite_lines(text: &str, opts: &ConvertOptions) -> String {
    text.split('\n')
        .map(|line| rewrite_line(line, opts))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A leading `*` run of length k followed by a blank is a list item at depth
/// k; it becomes k-1 levels of indentation plus a `-` bullet. Anything else
/// is a plain line.
fn rewrite_line(line: &str, opts: &ConvertOptions) -> String {
    match RE.list_item.captures(line) {
        Some(caps) => {
            let depth = caps[1].len();
            let content = apply_inline_rules(&caps[2]);
            let indent = if opts.list_indent_tabs {
                "\t".repeat(depth - 1)
            } else {
                " ".repeat(opts.indent_unit.max(1) * (depth - 1))
            };
            format!("{indent}- {content}")
        }
        None => apply_inline_rules(line),
    }
}

fn apply_inline_rules(line: &str) -> String {
    let mut out = line.to_string();
    for rule in INLINE_RULES {
        out = rule(&out);
    }
    out
}

/// Shared engine for the guarded wrappers. Group 1 is the consumed boundary
/// character (absent at line start), group 2 the content; the boundary is
/// re-emitted ahead of the replacement.
fn guarded(re: &Regex, text: &str, open: &str, close: &str) -> String {
    re.replace_all(text, |caps: &Captures| {
        let pre = caps.get(1).map_or("", |m| m.as_str());
        format!("{pre}{open}{}{close}", &caps[2])
    })
    .into_owned()
}

/// `??cite??`, `+ins+`, `^sup^`, `~sub~` to their HTML tags. The doubled and
/// plus wrappers take word-boundary guards; superscript and subscript stay
/// unguarded single tokens so `m^2^` and `CO~2~` keep working. Jira's `-del-`
/// is deliberately absent: a dashed token reads as strikethrough here.
fn rewrite_special_spans(line: &str) -> String {
    let out = guarded(&RE.cite, line, "<cite>", "</cite>");
    let out = guarded(&RE.ins, &out, "<ins>", "</ins>");
    let out = RE.sup.replace_all(&out, "<sup>${1}</sup>").into_owned();
    RE.sub.replace_all(&out, "<sub>${1}</sub>").into_owned()
}

/// `*content*` to `**content**`. Content must start and end on a word
/// character, and the opener must sit at line start or after a non-word
/// character, so multiplication signs and stray stars pass through.
fn rewrite_bold(line: &str) -> String {
    guarded(&RE.bold, line, "**", "**")
}

/// `_content_` to `*content*`, same guards as bold. Runs after it so the
/// single stars this rule emits are never re-wrapped.
fn rewrite_italic(line: &str) -> String {
    guarded(&RE.italic, line, "*", "*")
}

/// `-gone-` to `~~gone~~`, decided per whitespace-delimited token. A token
/// must be entirely wrapped, so hyphenated words, negative numbers and
/// multi-word dashes pass through.
fn rewrite_strikethrough(line: &str) -> String {
    if !line.contains('-') {
        return line.to_string();
    }
    line.split(' ')
        .map(|token| RE.strike_token.replace(token, "~~${1}~~").into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{{content}}` macros become backtick spans.
fn rewrite_inline_code(line: &str) -> String {
    RE.inline_code.replace_all(line, "`${1}`").into_owned()
}

/// `[text|url]` to `[text](url)`, dropping any trailing parameter segments,
/// then remaining bare `[url]` to `<url>`. The `(\()?` probe keeps the bare
/// pattern off the first rewrite's own output.
fn rewrite_links(line: &str) -> String {
    let out = RE.link.replace_all(line, "[${1}](${2})").into_owned();
    RE.bare_bracket
        .replace_all(&out, |caps: &Captures| match caps.get(2) {
            Some(_) => caps[0].to_string(),
            None => format!("<{}>", &caps[1]),
        })
        .into_owned()
}
