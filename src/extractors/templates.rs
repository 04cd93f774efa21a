// src/extractors/templates.rs

// --- Imports ---
use crate::extractors::config::ParserConfig;
use crate::extractors::markdown::{
    is_caps_heading, is_markdown_heading, is_separator, starts_with_list_number, strip_markdown,
};
use crate::extractors::section::is_convention_heading;
use crate::response::models::TemplateEntry;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const TEMPLATES_HEADER: &str = "DOCUMENT TEMPLATES";

// --- Regex Patterns (Lazy Static) ---
static TEMPLATES_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*(?:#{1,6}[ \t]*)?(?:\*\*)?[ \t]*document templates[ \t]*(?:\*\*)?[ \t]*:?[ \t]*(?:\*\*)?[ \t]*$")
        .expect("Failed to compile TEMPLATES_HEADING_RE")
});

static TEMPLATE_FILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s+(\w+\.txt)\b").expect("Failed to compile TEMPLATE_FILE_RE")
});

static SAMPLE_DOCUMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+\.\s+SAMPLE DOCUMENT:\s*(.+?)\s*$").expect("Failed to compile SAMPLE_DOCUMENT_RE")
});

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE")
});

static NON_FILENAME_CHAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9_]").expect("Failed to compile NON_FILENAME_CHAR_RE")
});

/// A line that opens a DOCUMENT TEMPLATES section.
pub(crate) fn is_templates_heading(line: &str) -> bool {
    TEMPLATES_HEADING_RE.is_match(line) || strip_markdown(line).starts_with(TEMPLATES_HEADER)
}

/// `Design_and_Access_Statement.txt` -> `Design And Access Statement`
pub fn display_name(filename: &str) -> String {
    let stem = filename.strip_suffix(".txt").unwrap_or(filename);
    stem.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Heritage Statement (Listed)` -> `heritage_statement_listed.txt`
pub fn sample_document_filename(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let underscored = WHITESPACE_RUN_RE.replace_all(&lower, "_");
    format!("{}.txt", NON_FILENAME_CHAR_RE.replace_all(&underscored, ""))
}

fn ends_templates_section(line: &str, config: &ParserConfig) -> bool {
    is_markdown_heading(line)
        || is_caps_heading(line, config.caps_heading_min_len)
        || is_separator(line, config.separator_min_len)
}

/// Lines inside DOCUMENT TEMPLATES sections, headers excluded.
fn template_section_lines<'a>(response_text: &'a str, config: &ParserConfig) -> Vec<&'a str> {
    let mut lines = Vec::new();
    let mut active = false;

    for line in response_text.lines() {
        if is_templates_heading(line) {
            active = true;
            continue;
        }
        if !active {
            continue;
        }
        if ends_templates_section(line, config) {
            active = false;
            continue;
        }
        lines.push(line);
    }
    lines
}

fn template_entry(line: &str) -> Option<TemplateEntry> {
    let cleaned = strip_markdown(line);
    if let Some(caps) = TEMPLATE_FILE_RE.captures(&cleaned) {
        let filename = caps[1].to_string();
        return Some(TemplateEntry { name: display_name(&filename), filename });
    }
    SAMPLE_DOCUMENT_RE.captures(&cleaned).map(|caps| {
        let name = caps[1].to_string();
        TemplateEntry { filename: sample_document_filename(&name), name }
    })
}

/// Scans DOCUMENT TEMPLATES sections for `1. Some_File.txt` listings (and the
/// older `1. SAMPLE DOCUMENT: Name` form).
pub fn parse_document_templates(response_text: &str, config: &ParserConfig) -> Vec<TemplateEntry> {
    let templates: Vec<TemplateEntry> = template_section_lines(response_text, config)
        .into_iter()
        .filter_map(template_entry)
        .collect();
    tracing::debug!("Parsed {} document template(s)", templates.len());
    templates
}

fn is_description_boundary(line: &str, config: &ParserConfig) -> bool {
    ends_templates_section(line, config)
        || is_convention_heading(line)
        || starts_with_list_number(line)
        || line.to_lowercase().contains(".txt")
}

// The line naming the document (with a filename or list number), then up to
// `max_lines` non-blank lines before the next heading or listing.
fn listed_description(name: &str, lines: &[&str], config: &ParserConfig) -> Option<String> {
    let name_lower = name.to_lowercase();
    let underscored = name_lower.replace(' ', "_");

    let start = lines.iter().position(|line| {
        let lower = line.to_lowercase();
        (lower.contains(&name_lower) || lower.contains(&underscored))
            && (lower.contains(".txt") || starts_with_list_number(line))
    })?;

    let description = lines[start + 1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .take_while(|line| !is_description_boundary(line, config))
        .take(config.description_max_lines)
        .map(|line| strip_markdown(line))
        .collect::<Vec<_>>()
        .join(" ");

    (!description.is_empty()).then_some(description)
}

fn mentioned_description(name: &str, lines: &[&str], config: &ParserConfig) -> Option<String> {
    let name_lower = name.to_lowercase();
    let idx = lines.iter().position(|line| line.to_lowercase().contains(&name_lower))?;

    let mut description = strip_markdown(lines[idx]);
    if let Some(next) = lines.get(idx + 1) {
        if !next.trim().is_empty() && !ends_templates_section(next, config) {
            description.push(' ');
            description.push_str(&strip_markdown(next));
        }
    }
    let description = description.trim().to_string();
    (!description.is_empty()).then_some(description)
}

/// Describes a template from the text around its listing.
///
/// Looks in the DOCUMENT TEMPLATES section when there is one, otherwise the
/// whole response; then for any line mentioning the name; and finally settles
/// for `"Template for <name>"`.
pub fn get_document_description(name: &str, response_text: &str, config: &ParserConfig) -> String {
    let section = template_section_lines(response_text, config);
    let all: Vec<&str> = response_text.lines().collect();
    let scope = if section.is_empty() { &all } else { &section };

    listed_description(name, scope, config)
        .or_else(|| mentioned_description(name, &all, config))
        .unwrap_or_else(|| format!("Template for {}", name))
}
