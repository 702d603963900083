//! Code-block protection.
//!
//! Fenced code blocks must survive every rewrite rule byte-for-byte, so both
//! pipelines start by lifting them out of the text and finish by substituting
//! them back. Protection is structural: the document becomes an alternating
//! list of text and code segments, and rules only ever run over the text
//! segments. No placeholder token exists, so no input can collide with one.
//!
//! Fences are line-level in both dialects: an opening fence is a whole line
//! (` ``` `, ` ```lang `, `{code}`, `{code:lang}`), and a block only forms
//! when a closing line follows. An opening fence that never closes is not a
//! block; its line stays ordinary text and is subject to all other rules.

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Code(CodeBlock),
}

/// A lifted fenced block.
#[derive(Debug, Clone, PartialEq)]
struct CodeBlock {
    /// Language hint from the opening fence, if one was written.
    hint: Option<String>,
    /// Interior lines including the trailing newline; empty when the opening
    /// and closing fences are adjacent.
    body: String,
}

/// A document split into rule-visible text and protected code segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Protected {
    segments: Vec<Segment>,
}

/// Lift triple-backtick fenced blocks out of Markdown text.
pub fn lift_markdown(input: &str) -> Protected {
    lift(input, markdown_fence_open, markdown_fence_close)
}

/// Lift `{code}` / `{code:lang}` blocks out of Jira wiki text.
pub fn lift_jira(input: &str) -> Protected {
    lift(input, jira_code_open, jira_code_close)
}

impl Protected {
    /// Apply `f` to every text segment, leaving code segments untouched.
    pub fn map_text<F: FnMut(&str) -> String>(mut self, mut f: F) -> Protected {
        for seg in &mut self.segments {
            if let Segment::Text(text) = seg {
                *text = f(text);
            }
        }
        self
    }

    /// Reassemble as Jira wiki text, emitting `{code}` fences. `resolve` maps
    /// each recorded language hint to the name the destination expects.
    pub fn restore_jira<F: Fn(&str) -> String>(&self, resolve: F) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Text(text) => out.push_str(text),
                Segment::Code(block) => {
                    match &block.hint {
                        Some(hint) => {
                            out.push_str("{code:");
                            out.push_str(&resolve(hint));
                            out.push_str("}\n");
                        }
                        None => out.push_str("{code}\n"),
                    }
                    out.push_str(&block.body);
                    out.push_str("{code}");
                }
            }
        }
        out
    }

    /// Reassemble as Markdown, emitting triple-backtick fences.
    pub fn restore_markdown<F: Fn(&str) -> String>(&self, resolve: F) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Text(text) => out.push_str(text),
                Segment::Code(block) => {
                    out.push_str("```");
                    if let Some(hint) = &block.hint {
                        out.push_str(&resolve(hint));
                    }
                    out.push('\n');
                    out.push_str(&block.body);
                    out.push_str("```");
                }
            }
        }
        out
    }
}

fn lift(
    input: &str,
    is_open: fn(&str) -> Option<CodeBlock>,
    is_close: fn(&str) -> bool,
) -> Protected {
    let lines: Vec<&str> = input.split('\n').collect();
    let last = lines.len() - 1;

    let mut segments = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some(mut block) = is_open(lines[i]) {
            // a block only forms when a closing fence line exists.
            if let Some(j) = (i + 1..lines.len()).find(|&j| is_close(lines[j])) {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                if j > i + 1 {
                    block.body = lines[i + 1..j].join("\n");
                    block.body.push('\n');
                }
                segments.push(Segment::Code(block));
                // the newline after the closing fence belongs to the
                // following text segment.
                if j < last {
                    text.push('\n');
                }
                i = j + 1;
                continue;
            }
        }
        text.push_str(lines[i]);
        if i < last {
            text.push('\n');
        }
        i += 1;
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    Protected { segments }
}

fn markdown_fence_open(line: &str) -> Option<CodeBlock> {
    if !line.starts_with("```") {
        return None;
    }
    let rest = line.trim_start_matches('`').trim();
    if rest.is_empty() {
        return Some(CodeBlock {
            hint: None,
            body: String::new(),
        });
    }
    // one token after the backticks is a language hint; any token may carry
    // punctuation (`c++`, `c#`). more than one token means this is not a
    // fence line.
    if rest.split_whitespace().count() > 1 {
        return None;
    }
    Some(CodeBlock {
        hint: Some(rest.to_string()),
        body: String::new(),
    })
}

fn markdown_fence_close(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 3 && t.chars().all(|c| c == '`')
}

fn jira_code_open(line: &str) -> Option<CodeBlock> {
    let rest = line.strip_prefix("{code")?;
    if let Some(after) = rest.strip_prefix('}') {
        if !after.trim().is_empty() {
            return None;
        }
        return Some(CodeBlock {
            hint: None,
            body: String::new(),
        });
    }
    let params = rest.strip_prefix(':')?;
    let end = params.find('}')?;
    if !params[end + 1..].trim().is_empty() {
        return None;
    }
    // Jira allows extra macro parameters after `|`; only the language
    // survives the conversion.
    let raw = &params[..end];
    let hint = raw.split('|').next().unwrap_or(raw).trim();
    if hint.is_empty() {
        return Some(CodeBlock {
            hint: None,
            body: String::new(),
        });
    }
    Some(CodeBlock {
        hint: Some(hint.to_string()),
        body: String::new(),
    })
}

fn jira_code_close(line: &str) -> bool {
    line.trim() == "{code}"
}
