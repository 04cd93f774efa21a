// src/extractors/markdown.rs
//! Markdown clean-up and line-shape helpers shared by the scanners.

use once_cell::sync::Lazy;
use regex::Regex;

// `[text](url)` -> `text`
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("Failed to compile LINK_RE")
});

// Leading bullets and blockquote markers, possibly stacked ("> - item")
static LEADING_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:(?:[-*+•][ \t]+)|(?:>[ \t]*))+").expect("Failed to compile LEADING_MARKER_RE")
});

static HEADING_HASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#+[ \t]*").expect("Failed to compile HEADING_HASH_RE")
});

static MARKDOWN_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*#{1,6}[ \t]+\S").expect("Failed to compile MARKDOWN_HEADING_RE")
});

static LIST_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*\d+[.)][ \t]+").expect("Failed to compile LIST_NUMBER_RE")
});

/// Strips inline and line-level markdown from agent text.
///
/// Removes `**`, `*` and backticks, unwraps `[text](url)` links, drops leading
/// bullet/blockquote markers and `#` heading markers, and un-escapes `\_` and `` \` ``.
pub fn strip_markdown(text: &str) -> String {
    let text = LINK_RE.replace_all(text, "$1");
    let text = LEADING_MARKER_RE.replace_all(&text, "");
    let text = HEADING_HASH_RE.replace_all(&text, "");

    let mut cleaned = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next @ ('_' | '`' | '*')) => {
                    cleaned.push(next);
                    chars.next();
                }
                _ => cleaned.push(c),
            },
            '*' | '`' => {}
            _ => cleaned.push(c),
        }
    }

    cleaned.trim().to_string()
}

/// Drops a leading `1.` / `1)` list number.
pub fn strip_list_number(line: &str) -> &str {
    match LIST_NUMBER_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

pub fn starts_with_list_number(line: &str) -> bool {
    LIST_NUMBER_RE.is_match(line)
}

pub fn is_markdown_heading(line: &str) -> bool {
    MARKDOWN_HEADING_RE.is_match(line)
}

/// A line made only of separator characters, at least `min_len` long.
pub fn is_separator(line: &str, min_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= min_len
        && trimmed.chars().all(|c| matches!(c, '=' | '-' | '_' | '*' | '~' | '─' | '━'))
}

/// An all-caps line that reads like a report heading ("DOCUMENT TEMPLATES", "NOTES:").
///
/// Numbered list lines never count, so `1. SAMPLE DOCUMENT: ...` stays an entry.
pub fn is_caps_heading(line: &str, min_letters: usize) -> bool {
    let cleaned = strip_markdown(line);
    if cleaned.is_empty() || starts_with_list_number(&cleaned) {
        return false;
    }
    let letters: Vec<char> = cleaned.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= min_letters && letters.iter().all(|c| c.is_uppercase())
}

/// Collapses every whitespace run to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
