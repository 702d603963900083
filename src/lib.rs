//! md2jira converts text between a Markdown dialect and Jira wiki markup.
//!
//! Both directions share one shape: fenced code blocks are lifted out first,
//! a fixed list of rewrite rules runs over everything else, a table pass
//! fixes header rows, and the blocks are substituted back with their
//! language hints resolved against a bundled table. Conversion is total:
//! malformed markup passes through unchanged instead of failing.

pub mod lang;
pub mod protect;
pub mod table;
pub mod to_jira;
pub mod to_markdown;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;

use walkdir::WalkDir;

/// Options shared by both conversion directions.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Spaces per Markdown list-nesting level. Bullet depth is indent width
    /// divided by this unit; a tab always counts as one unit.
    pub indent_unit: usize,
    /// Indent Markdown list items with tabs instead of spaces.
    pub list_indent_tabs: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            indent_unit: 2,
            list_indent_tabs: false,
        }
    }
}

/// Which way a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToJira,
    ToMarkdown,
}

impl Direction {
    /// Extension of source files in this direction.
    pub fn source_extension(self) -> &'static str {
        match self {
            Direction::ToJira => "md",
            Direction::ToMarkdown => "jira",
        }
    }

    /// Extension written for converted files in this direction.
    pub fn target_extension(self) -> &'static str {
        match self {
            Direction::ToJira => "jira",
            Direction::ToMarkdown => "md",
        }
    }
}

/// Convert Markdown text to Jira wiki markup with default options.
pub fn markdown_to_jira(input: &str) -> String {
    to_jira::convert(input, &ConvertOptions::default())
}

/// Like [`markdown_to_jira`], but allows callers to customize list handling.
pub fn markdown_to_jira_with_options(input: &str, opts: &ConvertOptions) -> String {
    to_jira::convert(input, opts)
}

/// Convert Jira wiki markup to Markdown text with default options.
pub fn jira_to_markdown(input: &str) -> String {
    to_markdown::convert(input, &ConvertOptions::default())
}

/// Like [`jira_to_markdown`], but allows callers to customize list handling.
pub fn jira_to_markdown_with_options(input: &str, opts: &ConvertOptions) -> String {
    to_markdown::convert(input, opts)
}

/// Convert text in the given direction.
pub fn convert_str(input: &str, direction: Direction, opts: &ConvertOptions) -> String {
    match direction {
        Direction::ToJira => to_jira::convert(input, opts),
        Direction::ToMarkdown => to_markdown::convert(input, opts),
    }
}

/// Newlines are normalized once at pipeline entry so every pattern can
/// assume bare `\n`.
pub(crate) fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Read a file and convert its contents.
pub fn convert_file(
    path: &Path,
    direction: Direction,
    opts: &ConvertOptions,
) -> Result<String, Box<dyn Error>> {
    let bytes = fs::read(path)?;

    // if we ever encounter invalid UTF-8, fallback to lossy conversion
    let text = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).to_string());

    Ok(convert_str(&text, direction, opts))
}

/// Bulk mode: walk `src_root` for files with the direction's source
/// extension and write converted copies under `dst_root`, mirroring the
/// directory structure. Returns the number of files written.
pub fn convert_tree(
    src_root: &Path,
    dst_root: &Path,
    direction: Direction,
    opts: &ConvertOptions,
) -> Result<usize, Box<dyn Error>> {
    let start_time = Instant::now();

    if !src_root.exists() {
        return Err(format!("Source directory not found: {}", src_root.display()).into());
    }

    let mut entries: Vec<_> = WalkDir::new(src_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext == direction.source_extension())
        })
        .collect();

    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let total = entries.len();
    let mut count = 0;

    for entry in entries {
        let path = entry.path();
        // keep the relative path structure intact under the target root.
        let relative = path.strip_prefix(src_root)?;

        let mut out_path = dst_root.join(relative);
        out_path.set_extension(direction.target_extension());

        // ensure the parent directory exists for the target file
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let converted = convert_file(path, direction, opts)?;
        fs::write(&out_path, converted)?;

        count += 1;

        let elapsed = start_time.elapsed();
        let total_ms = elapsed.as_millis();
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let ms = total_ms % 1_000;
        eprintln!(
            "[{:>4}/{:>4}] [{:02}:{:02}.{:03}] Converted: {:?}",
            count, total, mins, secs, ms, out_path
        );
    }

    let total_elapsed = start_time.elapsed();
    let total_secs = total_elapsed.as_secs_f64();
    let avg_str = if count > 0 {
        format!("{:.3}s", total_secs / count as f64)
    } else {
        "-".to_string()
    };

    eprintln!(
        "Done. Converted {} files in {:.3}s (avg {}/doc).",
        count, total_secs, avg_str
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_extensions() {
        assert_eq!(Direction::ToJira.source_extension(), "md");
        assert_eq!(Direction::ToJira.target_extension(), "jira");
        assert_eq!(Direction::ToMarkdown.source_extension(), "jira");
        assert_eq!(Direction::ToMarkdown.target_extension(), "md");
    }

    #[test]
    fn test_convert_str_dispatches_by_direction() {
        let opts = ConvertOptions::default();
        assert_eq!(convert_str("# T", Direction::ToJira, &opts), "h1.T");
        assert_eq!(convert_str("h1.T", Direction::ToMarkdown, &opts), "#T");
    }

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.indent_unit, 2);
        assert!(!opts.list_indent_tabs);
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        assert_eq!(normalize_newlines("a\r\nb\nc"), "a\nb\nc");
    }
}
