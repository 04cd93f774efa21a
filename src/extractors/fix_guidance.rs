// src/extractors/fix_guidance.rs

// --- Imports ---
use crate::extractors::config::ParserConfig;
use crate::extractors::markdown::{
    collapse_whitespace, is_caps_heading, is_separator, starts_with_list_number, strip_list_number,
    strip_markdown,
};
use crate::extractors::missing_fields::is_missing_fields_heading;
use crate::extractors::templates::is_templates_heading;
use crate::response::models::{FixSection, MissingFieldEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// --- Constants ---
pub(crate) const FIX_HEADER_PHRASES: [&str; 7] = [
    "HOW TO FIX",
    "GUIDANCE",
    "RECOMMENDATIONS",
    "NEXT STEPS",
    "REQUIRED ACTIONS",
    "ACTION REQUIRED",
    "FIX REQUIRED",
];

pub const FALLBACK_SECTION_TITLE: &str = "Application Guidance";

// Max length of a line that may name a document when inferring its filename.
const INFERRED_TITLE_MAX_LEN: usize = 80;

// --- Regex Patterns (Lazy Static) ---
static FILENAME_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([\w.\-]+\.txt)\b").expect("Failed to compile FILENAME_LINE_RE")
});

// A `.txt` filename anywhere in the line ("For planning_statement.txt:")
static FILENAME_ANYWHERE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([\w.\-]+\.txt)\b").expect("Failed to compile FILENAME_ANYWHERE_RE")
});

static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:[-*+•]|>)[ \t]+").expect("Failed to compile BULLET_RE")
});

// `Label: text` once markdown is gone
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][^:]{0,60}:(?:\s|$)").expect("Failed to compile LABEL_RE")
});

// `**label:** text` or `**label**: text` anywhere in the response
static BOLD_LABEL_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*\n]+?)(?::\*\*|\*\*:)[ \t]*([^\n]+)").expect("Failed to compile BOLD_LABEL_PAIR_RE")
});

static NON_ALNUM_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9]+").expect("Failed to compile NON_ALNUM_RUN_RE")
});

fn has_fix_header(line: &str) -> bool {
    FIX_HEADER_PHRASES.iter().any(|phrase| line.contains(phrase))
}

fn clean_item(line: &str) -> String {
    collapse_whitespace(strip_list_number(&strip_markdown(line)))
}

fn is_item_start(line: &str, cleaned: &str) -> bool {
    BULLET_RE.is_match(line) || starts_with_list_number(line) || LABEL_RE.is_match(cleaned)
}

/// `Design and Access Statement` -> `design_and_access_statement.txt`
pub(crate) fn filename_for(title: &str) -> String {
    let lower = title.to_lowercase();
    format!("{}.txt", NON_ALNUM_RUN_RE.replace_all(&lower, "_").trim_matches('_'))
}

// A line led by a filename opens its section even when numbered. Elsewhere in
// the line a filename only counts outside bullet and numbered items.
fn explicit_filename(line: &str, cleaned: &str) -> Option<String> {
    if let Some(caps) = FILENAME_LINE_RE.captures(strip_list_number(cleaned)) {
        return Some(caps[1].to_string());
    }
    if BULLET_RE.is_match(line) || starts_with_list_number(line) {
        return None;
    }
    FILENAME_ANYWHERE_RE.captures(cleaned).map(|caps| caps[1].to_string())
}

// A bare document title whose next non-blank line talks about its missing fields.
fn inferred_filename(line: &str, cleaned: &str, next_line: Option<&str>) -> Option<String> {
    let title = strip_list_number(cleaned);
    let looks_like_title = !title.is_empty()
        && !title.contains(':')
        && !BULLET_RE.is_match(line)
        && title.len() <= INFERRED_TITLE_MAX_LEN;
    if !looks_like_title {
        return None;
    }
    next_line
        .filter(|next| next.to_lowercase().contains("missing fields"))
        .map(|_| filename_for(title))
}

struct FixScanner<'a> {
    relevant: &'a HashSet<String>,
    sections: Vec<FixSection>,
    current: Option<FixSection>,
}

impl<'a> FixScanner<'a> {
    fn finalize(&mut self) {
        if let Some(section) = self.current.take() {
            if !section.items.is_empty() {
                self.sections.push(section);
            }
        }
    }

    fn open(&mut self, filename: String) {
        self.finalize();
        if self.relevant.contains(&filename.to_lowercase()) {
            tracing::trace!("Opening fix section for '{}'", filename);
            self.current = Some(FixSection { title: filename, items: Vec::new() });
        } else {
            tracing::debug!("Ignoring guidance for '{}': not listed under MISSING FIELDS", filename);
        }
    }

    fn add_line(&mut self, line: &str, cleaned: &str) {
        let Some(section) = self.current.as_mut() else {
            return;
        };
        let item = clean_item(line);
        if item.is_empty() {
            return;
        }
        if !is_item_start(line, cleaned) {
            if let Some(last) = section.items.last_mut() {
                last.push(' '); // Continuation of the previous item
                last.push_str(&item);
                return;
            }
        }
        section.items.push(item);
    }
}

/// Scans HOW TO FIX style sections into per-file guidance.
///
/// Only files listed in `missing` get a section. When nothing is found this
/// falls back to every `**label:** text` pair in the response, then to the
/// response's sentences, each as a single "Application Guidance" section.
pub fn parse_how_to_fix(
    response_text: &str,
    missing: &[MissingFieldEntry],
    config: &ParserConfig,
) -> Vec<FixSection> {
    let relevant: HashSet<String> = missing.iter().map(|m| m.filename.to_lowercase()).collect();
    let mut scanner = FixScanner { relevant: &relevant, sections: Vec::new(), current: None };
    let mut active = false;

    let lines: Vec<&str> = response_text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if has_fix_header(trimmed) {
            scanner.finalize();
            active = true;
            tracing::debug!("Fix guidance section started at '{}'", trimmed);
            continue;
        }
        if !active {
            continue;
        }
        if is_missing_fields_heading(trimmed) || is_templates_heading(trimmed) {
            scanner.finalize();
            active = false;
            continue;
        }
        if trimmed.is_empty() || is_separator(trimmed, config.separator_min_len) {
            continue;
        }

        let cleaned = strip_markdown(trimmed);
        if let Some(filename) = explicit_filename(line, &cleaned) {
            scanner.open(filename);
            continue;
        }

        let next_line = lines[idx + 1..].iter().map(|l| l.trim()).find(|l| !l.is_empty());
        if let Some(filename) = inferred_filename(line, &cleaned, next_line) {
            scanner.open(filename);
            continue;
        }

        if !BULLET_RE.is_match(line) && is_caps_heading(trimmed, config.caps_heading_min_len) {
            tracing::trace!("Fix guidance section ended at heading '{}'", trimmed);
            scanner.finalize();
            active = false;
            continue;
        }

        scanner.add_line(line, &cleaned);
    }
    scanner.finalize();

    if !scanner.sections.is_empty() {
        tracing::debug!("Parsed {} fix section(s)", scanner.sections.len());
        return scanner.sections;
    }

    let labelled = bold_label_pairs(response_text);
    if !labelled.is_empty() {
        tracing::debug!("No fix sections, using {} bold label pair(s)", labelled.len());
        return vec![FixSection { title: FALLBACK_SECTION_TITLE.to_string(), items: labelled }];
    }

    let sentence_items = sentences(response_text, config.min_sentence_len);
    if sentence_items.is_empty() {
        return Vec::new();
    }
    tracing::debug!("No structured guidance, using {} sentence(s)", sentence_items.len());
    vec![FixSection { title: FALLBACK_SECTION_TITLE.to_string(), items: sentence_items }]
}

fn bold_label_pairs(text: &str) -> Vec<String> {
    BOLD_LABEL_PAIR_RE
        .captures_iter(text)
        .map(|caps| format!("{}: {}", caps[1].trim(), strip_markdown(&caps[2])))
        .collect()
}

fn sentences(text: &str, min_len: usize) -> Vec<String> {
    text.split(&['.', '!', '?'][..])
        .map(|s| collapse_whitespace(&strip_markdown(s)))
        .filter(|s| s.chars().count() > min_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fixtures::{NUMBERED_BOLD_RESPONSE, REPORT_RESPONSE};
    use crate::extractors::missing_fields::parse_missing_fields;

    fn missing(files: &[&str]) -> Vec<MissingFieldEntry> {
        files
            .iter()
            .map(|f| MissingFieldEntry { filename: f.to_string(), issues: vec!["x".to_string()] })
            .collect()
    }

    #[test]
    fn test_report_fixture_sections() {
        let config = ParserConfig::default();
        let missing = parse_missing_fields(REPORT_RESPONSE, &config);
        let sections = parse_how_to_fix(REPORT_RESPONSE, &missing, &config);

        assert_eq!(sections, vec![
            FixSection {
                title: "design_and_access_statement.txt".to_string(),
                items: vec![
                    "Design Rationale: Explain how the extension relates to the existing house.".to_string(),
                    "Accessibility: Describe step-free access.".to_string(),
                ],
            },
            FixSection {
                title: "planning_statement.txt".to_string(),
                items: vec!["Cite policy H4 from the local plan.".to_string()],
            },
        ], "flood_risk_assessment.txt is not listed as missing");
    }

    #[test]
    fn test_inferred_filename_from_missing_fields_line() {
        let text = "NEXT STEPS\n**Heritage Statement**\nMissing fields: Impact of Proposal\nAdd photos of the asset.\n";
        let sections = parse_how_to_fix(text, &missing(&["heritage_statement.txt"]), &ParserConfig::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "heritage_statement.txt");
        assert_eq!(sections[0].items, vec!["Missing fields: Impact of Proposal Add photos of the asset."]);
    }

    #[test]
    fn test_caps_heading_ends_section() {
        let text = "HOW TO FIX\nplanning_statement.txt\n- Add a summary\nCONTACT DETAILS\n- Call the council\n";
        let sections = parse_how_to_fix(text, &missing(&["Planning_Statement.txt"]), &ParserConfig::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items, vec!["Add a summary"]);
    }

    #[test]
    fn test_bold_label_fallback() {
        let sections = parse_how_to_fix(NUMBERED_BOLD_RESPONSE, &[], &ParserConfig::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, FALLBACK_SECTION_TITLE);
        assert_eq!(sections[0].items.len(), 8);
        assert_eq!(
            sections[0].items[0],
            "Design Rationale: Provide detailed information about the design rationale."
        );
    }

    #[test]
    fn test_unlisted_files_fall_back() {
        let text = "HOW TO FIX\nplanning_statement.txt\n- Add a summary of the works\n";
        let sections = parse_how_to_fix(text, &[], &ParserConfig::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, FALLBACK_SECTION_TITLE, "Sentence fallback, not a per-file section");
        assert_eq!(sections[0].items.len(), 2);
    }

    #[test]
    fn test_sentence_fallback() {
        let text = "Your application is incomplete. Ok! Please upload the missing plans soon?";
        let sections = parse_how_to_fix(text, &[], &ParserConfig::default());
        assert_eq!(sections[0].items, vec![
            "Your application is incomplete",
            "Please upload the missing plans soon",
        ]);
        assert!(parse_how_to_fix("", &[], &ParserConfig::default()).is_empty());
    }

    #[test]
    fn test_filename_mentioned_mid_line() {
        let text = "MISSING FIELDS\n1. planning_statement.txt\n- Summary\n==========\nHOW TO FIX\nFor **planning_statement.txt**:\n- Add a summary of the proposed works";
        let config = ParserConfig::default();
        let entries = parse_missing_fields(text, &config);
        let sections = parse_how_to_fix(text, &entries, &config);
        assert_eq!(sections, vec![FixSection {
            title: "planning_statement.txt".to_string(),
            items: vec!["Add a summary of the proposed works".to_string()],
        }]);

        let labelled = "HOW TO FIX\nFile: `design_and_access_statement.txt`\n- Explain the design rationale\n";
        let sections = parse_how_to_fix(labelled, &missing(&["design_and_access_statement.txt"]), &config);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "design_and_access_statement.txt");
    }

    #[test]
    fn test_item_mentioning_filename_stays_an_item() {
        let text = "HOW TO FIX\nplanning_statement.txt\n- Keep it consistent with design_and_access_statement.txt\n";
        let files = missing(&["planning_statement.txt", "design_and_access_statement.txt"]);
        let sections = parse_how_to_fix(text, &files, &ParserConfig::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "planning_statement.txt");
        assert_eq!(sections[0].items, vec!["Keep it consistent with design_and_access_statement.txt"]);
    }

    #[test]
    fn test_stops_at_mixed_case_templates_heading() {
        let text = "HOW TO FIX\nplanning_statement.txt\n- Add a summary\n## Document Templates\n1. planning_statement.txt\nTemplate covering the works summary.";
        let sections = parse_how_to_fix(text, &missing(&["planning_statement.txt"]), &ParserConfig::default());
        assert_eq!(sections, vec![FixSection {
            title: "planning_statement.txt".to_string(),
            items: vec!["Add a summary".to_string()],
        }]);
    }

    #[test]
    fn test_stops_at_markdown_missing_fields_heading() {
        let text = "HOW TO FIX\nplanning_statement.txt\n- Add a summary\n### **Missing Fields:**\nheritage_statement.txt\n- Impact\n";
        let files = missing(&["planning_statement.txt", "heritage_statement.txt"]);
        let sections = parse_how_to_fix(text, &files, &ParserConfig::default());
        assert_eq!(sections.len(), 1, "Lines after the heading are not fix guidance");
        assert_eq!(sections[0].items, vec!["Add a summary"]);
    }

    #[test]
    fn test_filename_for_titles() {
        assert_eq!(filename_for("Design and Access Statement"), "design_and_access_statement.txt");
        assert_eq!(filename_for("Tree Survey/Arboricultural Report"), "tree_survey_arboricultural_report.txt");
    }
}
