//! AFL++ fuzz target for `md2jira`.
//!
//! This binary is intentionally stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin md2jira_afl_convert
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   -x fuzz/afl/dict/markup.dict \
//!   target/release/md2jira_afl_convert
//! ```
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts. We therefore catch any unwind
//! and turn it into `abort()`.

use std::io::Read;

use md2jira::{
    ConvertOptions, jira_to_markdown, jira_to_markdown_with_options, markdown_to_jira,
    markdown_to_jira_with_options,
};

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        // guardrail: avoid pathological OOM / quadratic behavior on enormous inputs.
        return;
    }

    // editor panes hold UTF-8, but AFL++ will happily hand us arbitrary bytes.
    // lossy conversion keeps the harness total (no early returns that reduce coverage).
    let src = String::from_utf8_lossy(data).to_string();

    // invariants that must hold for any input (valid or invalid):
    // - neither direction panics
    // - both directions are deterministic
    // - each direction's output is acceptable input for the other
    let jira = markdown_to_jira(&src);
    assert_eq!(jira, markdown_to_jira(&src));

    let md = jira_to_markdown(&src);
    assert_eq!(md, jira_to_markdown(&src));

    let _ = jira_to_markdown(&jira);
    let _ = markdown_to_jira(&md);

    // option variants cover the list-indent arithmetic.
    let tabs = ConvertOptions {
        list_indent_tabs: true,
        ..ConvertOptions::default()
    };
    let _ = jira_to_markdown_with_options(&src, &tabs);

    let wide = ConvertOptions {
        indent_unit: 4,
        ..ConvertOptions::default()
    };
    let _ = markdown_to_jira_with_options(&src, &wide);
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
