use std::fs;
use std::path::PathBuf;

use md2jira::{jira_to_markdown, markdown_to_jira};

fn base_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
}

/// Compare a conversion against its golden file. On mismatch the actual
/// output lands next to the fixture as `*-out-*` for inspection; on a pass
/// any stale `*-out-*` file is cleaned up.
fn check_golden(in_name: &str, want_name: &str, out_name: &str, convert: fn(&str) -> String) {
    let in_path = base_dir().join(in_name);
    let want_path = base_dir().join(want_name);

    let want_bytes = fs::read(&want_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", want_path.display()));
    let want = String::from_utf8_lossy(&want_bytes).into_owned();

    let in_bytes =
        fs::read(&in_path).unwrap_or_else(|e| panic!("failed to read {}: {e}", in_path.display()));
    let in_str = String::from_utf8_lossy(&in_bytes).into_owned();
    let actual = convert(&in_str);

    let out_path = base_dir().join(out_name);
    if !actual.eq(&want) {
        fs::write(&out_path, &actual)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", out_path.display()));
    } else if out_path.exists() {
        fs::remove_file(&out_path)
            .unwrap_or_else(|e| panic!("failed to remove {}: {e}", out_path.display()));
    }

    assert_eq!(actual, want);
}

#[test]
fn test_mixed_document_to_jira() {
    check_golden(
        "001-in-mixed-document.md",
        "001-want-mixed-document.jira",
        "001-out-mixed-document.jira",
        markdown_to_jira,
    );
}

#[test]
fn test_issue_description_to_markdown() {
    check_golden(
        "002-in-issue-description.jira",
        "002-want-issue-description.md",
        "002-out-issue-description.md",
        jira_to_markdown,
    );
}
