//! Code-fence language lookup.
//!
//! Maps the hint written after a Markdown fence (identifiers like
//! `TypeScript`, file extensions like `ts`) to the canonical name Jira's
//! `{code:...}` macro accepts. The table lives in `languages.json` so adding
//! a language is a data edit, not a code edit.

use std::sync::LazyLock;

use serde::Deserialize;

/// One language the destination dialect's code macro understands.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    /// Canonical name emitted into `{code:name}` blocks.
    pub name: String,
    /// Accepted spelling variants of the language name.
    pub identifiers: Vec<String>,
    /// File extensions that imply the language.
    pub extensions: Vec<String>,
}

/// Sentinel returned when no table entry matches.
pub const UNSUPPORTED: &str = "none";

static LANGUAGES: LazyLock<Vec<LanguageEntry>> =
    LazyLock::new(|| serde_json::from_str(include_str!("languages.json")).expect("valid table"));

/// Resolve a fence hint to the canonical language name, or [`UNSUPPORTED`].
///
/// Matching is exact set membership over identifiers and extensions; the
/// first matching entry wins. No case folding or trimming happens here, so
/// callers wanting fuzzy matching must normalize before calling.
pub fn supported_name(hint: &str) -> &'static str {
    for entry in LANGUAGES.iter() {
        if entry.identifiers.iter().any(|i| i == hint)
            || entry.extensions.iter().any(|e| e == hint)
        {
            return &entry.name;
        }
    }
    UNSUPPORTED
}
