//! Constrained markdown to HTML conversion for assistant text.
//!
//! The input is escaped first, so whatever the backend sends, the only tags
//! in the output are the ones produced by the steps below.

use crate::ui::html::escape;
use regex::Regex;
use std::sync::OnceLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("markdown rule pattern is valid"),
            replacement,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

fn apply_all(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |acc, rule| rule.apply(&acc))
}

fn emphasis_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"\*\*\*([^*]+)\*\*\*", "<strong><em>$1</em></strong>"),
            Rule::new(r"\*\*([^*]+)\*\*", "<strong>$1</strong>"),
            Rule::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*", "<em>$1</em>"),
        ]
    })
}

fn heading_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"(?m)^###[ \t]*([^\n]+)$", "<h4>$1</h4>"),
            Rule::new(r"(?m)^##[ \t]*([^\n]+)$", "<h3>$1</h3>"),
            Rule::new(r"(?m)^#[ \t]*([^\n]+)$", "<h2>$1</h2>"),
        ]
    })
}

fn list_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"(?m)^\d+\.[ \t]+([^\n]+)$", "<p><strong>$1</strong></p>"),
            Rule::new(r"(?m)^[-*][ \t]+([^\n]+)$", "<p>• $1</p>"),
        ]
    })
}

fn break_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"\n{2,}", "</p><p>"),
            Rule::new(r"\n", "<br>"),
        ]
    })
}

fn cleanup_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(r"<p></p>", ""),
            Rule::new(r"<p>(?:<br>)+", "<p>"),
            Rule::new(r"(?:<br>)+</p>", "</p>"),
            Rule::new(r"(?:<br>){2,}", "<br>"),
            // Loose text next to a block gets its own paragraph.
            Rule::new(r"(</(?:p|h2|h3|h4)>)<br>", "$1<p>"),
            Rule::new(r"<br>(<(?:p|h2|h3|h4)>)", "</p>$1"),
            Rule::new(r"(?:<p>)+(<(?:p|h2|h3|h4)>)", "$1"),
            Rule::new(r"(</(?:p|h2|h3|h4)>)(?:</p>)+", "$1"),
            Rule::new(r"<p></p>", ""),
        ]
    })
}

const BLOCK_OPENERS: [&str; 4] = ["<p>", "<h2>", "<h3>", "<h4>"];
const BLOCK_CLOSERS: [&str; 4] = ["</p>", "</h2>", "</h3>", "</h4>"];

/// Steps 1-3: `***x***`, `**x**`, `*x*`.
pub fn emphasize(text: String) -> String {
    apply_all(emphasis_rules(), text)
}

/// Step 4: `###`, `##`, `#` line prefixes, longest marker first.
pub fn headings(text: String) -> String {
    apply_all(heading_rules(), text)
}

/// Steps 5-6: numbered lines become bold paragraphs, `-`/`*` lines bullets.
pub fn list_lines(text: String) -> String {
    apply_all(list_rules(), text)
}

/// Step 7: blank lines split paragraphs, single newlines become `<br>`.
pub fn line_breaks(text: String) -> String {
    apply_all(break_rules(), text)
}

/// Step 8: wrap in a paragraph unless the fragment is already block-delimited.
pub fn wrap_paragraph(text: String) -> String {
    if text.is_empty() {
        return text;
    }
    let opens = BLOCK_OPENERS.iter().any(|tag| text.starts_with(tag));
    let closes = BLOCK_CLOSERS.iter().any(|tag| text.ends_with(tag));
    if opens && closes {
        text
    } else {
        format!("<p>{}</p>", text)
    }
}

/// Step 9: drop empty paragraphs and breaks that sit next to block tags.
pub fn collapse(text: String) -> String {
    apply_all(cleanup_rules(), text)
}

/// Renders assistant markdown into an HTML fragment safe for insertion.
pub fn render(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let steps: [fn(String) -> String; 6] = [
        emphasize,
        headings,
        list_lines,
        line_breaks,
        wrap_paragraph,
        collapse,
    ];
    let normalized = text.replace("\r\n", "\n");
    let html = steps
        .iter()
        .fold(escape(&normalized), |acc, step| step(acc));
    html.trim().to_string()
}
