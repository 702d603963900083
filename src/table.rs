//! Table header conversion.
//!
//! The two dialects mark a table's header row differently: Markdown puts a
//! separator line of dashes under it, Jira doubles the pipes in the row
//! itself. Translating one into the other adds or removes a whole line, so
//! this cannot be a substitution rule; it is a small state machine over the
//! line sequence instead. Only the first header row per contiguous table
//! block is rewritten, matching the converter's historical behavior for
//! multi-header tables.

/// Markdown -> Jira: drop the `| -` separator line and double every pipe in
/// the header row above it.
///
/// A separator with no table line directly above it has no header to mark
/// and passes through unchanged.
pub fn markdown_separators_to_jira(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut done_in_block = false;

    for line in text.split('\n') {
        if !line.trim_start().starts_with('|') {
            done_in_block = false;
            out.push(line.to_string());
            continue;
        }
        if !done_in_block && line.starts_with("| -") {
            if let Some(prev) = out.last_mut() {
                if prev.trim_start().starts_with('|') {
                    *prev = prev.replace('|', "||");
                    done_in_block = true;
                    continue;
                }
            }
        }
        out.push(line.to_string());
    }

    out.join("\n")
}

/// Jira -> Markdown: collapse `||` header pipes to `|` and insert the
/// Markdown separator line below, one `---` field per column.
///
/// The column count comes from the number of `||` boundaries in the header
/// row minus one.
pub fn jira_headers_to_markdown(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut done_in_block = false;

    for line in text.split('\n') {
        let trimmed = line.trim_start();
        if !trimmed.starts_with('|') {
            done_in_block = false;
            out.push(line.to_string());
            continue;
        }
        if !done_in_block && trimmed.starts_with("||") {
            let columns = line.matches("||").count().saturating_sub(1);
            out.push(line.replace("||", "|"));
            if columns > 0 {
                out.push(format!("|{}", " --- |".repeat(columns)));
            }
            done_in_block = true;
            continue;
        }
        out.push(line.to_string());
    }

    out.join("\n")
}
