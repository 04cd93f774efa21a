// src/extractors/missing_fields.rs

// --- Imports ---
use crate::extractors::config::ParserConfig;
use crate::extractors::markdown::{is_caps_heading, is_separator, strip_markdown};
use crate::response::models::MissingFieldEntry;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const MISSING_FIELDS_HEADER: &str = "MISSING FIELDS";

// `1. some_file.txt`, checked against the markdown-stripped line
static FILE_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+[.)]\s+([\w.\-]+\.txt)\b").expect("Failed to compile FILE_ENTRY_RE")
});

// `## Missing Fields:` and friends, in any case, alone on the line
static MISSING_FIELDS_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*(?:#{1,6}[ \t]*)?(?:\*\*)?[ \t]*missing fields[ \t]*(?:\*\*)?[ \t]*:?[ \t]*(?:\*\*)?[ \t]*$")
        .expect("Failed to compile MISSING_FIELDS_HEADING_RE")
});

/// A line that opens a MISSING FIELDS section.
pub(crate) fn is_missing_fields_heading(line: &str) -> bool {
    strip_markdown(line).starts_with(MISSING_FIELDS_HEADER) || MISSING_FIELDS_HEADING_RE.is_match(line)
}

/// Scans MISSING FIELDS sections into one entry per listed file.
///
/// Only files with at least one `- ` issue line are returned. A section ends at
/// a separator line, an unrelated all-caps heading, or when no file entry shows
/// up within `missing_fields_lookahead` lines of the header.
pub fn parse_missing_fields(response_text: &str, config: &ParserConfig) -> Vec<MissingFieldEntry> {
    let mut entries = Vec::new();
    let mut active = false;
    let mut current: Option<MissingFieldEntry> = None;
    let mut lines_since_header = 0;

    fn flush(current: &mut Option<MissingFieldEntry>, entries: &mut Vec<MissingFieldEntry>) {
        if let Some(entry) = current.take() {
            if entry.issues.is_empty() {
                tracing::trace!("Dropping '{}': no issues listed", entry.filename);
            } else {
                entries.push(entry);
            }
        }
    }

    for line in response_text.lines() {
        if is_missing_fields_heading(line) {
            flush(&mut current, &mut entries);
            active = true;
            lines_since_header = 0;
            tracing::debug!("MISSING FIELDS section started");
            continue;
        }
        if !active {
            continue;
        }

        let trimmed = line.trim();
        let cleaned = strip_markdown(trimmed);

        if is_separator(trimmed, config.separator_min_len) {
            tracing::trace!("MISSING FIELDS section ended at separator");
            flush(&mut current, &mut entries);
            active = false;
        } else if let Some(caps) = FILE_ENTRY_RE.captures(&cleaned) {
            flush(&mut current, &mut entries);
            current = Some(MissingFieldEntry { filename: caps[1].to_string(), issues: Vec::new() });
        } else if let Some(issue) = trimmed.strip_prefix("- ") {
            match current.as_mut() {
                Some(entry) => entry.issues.push(strip_markdown(issue)),
                None => tracing::trace!("Issue line before any file entry: '{}'", trimmed),
            }
        } else if is_caps_heading(trimmed, config.caps_heading_min_len) {
            tracing::trace!("MISSING FIELDS section ended at heading '{}'", trimmed);
            flush(&mut current, &mut entries);
            active = false;
        } else if current.is_none() {
            lines_since_header += 1;
            if lines_since_header > config.missing_fields_lookahead {
                tracing::debug!("No file entries within {} lines of MISSING FIELDS header", config.missing_fields_lookahead);
                active = false;
            }
        }
    }

    flush(&mut current, &mut entries);
    tracing::debug!("Parsed {} missing-field entries", entries.len());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fixtures::REPORT_RESPONSE;

    fn parse(text: &str) -> Vec<MissingFieldEntry> {
        parse_missing_fields(text, &ParserConfig::default())
    }

    #[test]
    fn test_single_file_with_two_issues() {
        let text = "MISSING FIELDS\n1. design_and_access_statement.txt\n- Design Rationale\n- Materials and Appearance\n";
        assert_eq!(parse(text), vec![MissingFieldEntry {
            filename: "design_and_access_statement.txt".to_string(),
            issues: vec!["Design Rationale".to_string(), "Materials and Appearance".to_string()],
        }]);
    }

    #[test]
    fn test_report_fixture() {
        let entries = parse(REPORT_RESPONSE);
        let files: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(files, vec!["design_and_access_statement.txt", "planning_statement.txt"], "heritage_statement.txt has no issues");
        assert_eq!(entries[0].issues, vec!["Design Rationale", "Accessibility (if relevant)"]);
        assert_eq!(entries[1].issues, vec!["Compliance with Local Policies"]);
    }

    #[test]
    fn test_markdown_header_and_bold_filenames() {
        let text = "### **MISSING FIELDS:**\n\n1. **flood_risk_assessment.txt**\n- **Flood Zone** not stated\n";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "flood_risk_assessment.txt");
        assert_eq!(entries[0].issues, vec!["Flood Zone not stated"]);
    }

    #[test]
    fn test_stops_at_caps_heading() {
        let text = "MISSING FIELDS\n1. planning_statement.txt\n- Summary\nNEXT STEPS\n- Upload the file\n2. heritage_statement.txt\n- Impact\n";
        let entries = parse(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].issues, vec!["Summary"], "Lines after the heading belong elsewhere");
    }

    #[test]
    fn test_gives_up_after_lookahead() {
        let mut text = String::from("MISSING FIELDS\n");
        text.push_str(&"\n".repeat(12));
        text.push_str("1. planning_statement.txt\n- Summary\n");
        assert!(parse(&text).is_empty());

        let config = ParserConfig { missing_fields_lookahead: 20, ..ParserConfig::default() };
        assert_eq!(parse_missing_fields(&text, &config).len(), 1);
    }

    #[test]
    fn test_mixed_case_heading() {
        let text = "## Missing Fields\n1. planning_statement.txt\n- Summary\n";
        assert_eq!(parse(text).len(), 1);
        assert!(!is_missing_fields_heading("Missing fields: Impact of Proposal"), "Prose label is not a heading");
    }

    #[test]
    fn test_no_section() {
        assert!(parse("").is_empty());
        assert!(parse("1. planning_statement.txt\n- Summary").is_empty(), "Entries outside the section are ignored");
    }
}
