// src/extractors/tokenizer.rs

// --- Imports ---
use crate::extractors::markdown::collapse_whitespace;
use crate::extractors::section::Convention;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// `- **Title**: description` or `- **Title:** description`
static BOLD_BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*[-*•][ \t]+\*\*([^*]+?)(?::\*\*|\*\*[ \t]*:)[ \t]*(.*)$")
        .expect("Failed to compile BOLD_BULLET_RE")
});

pub(crate) static NUMBERED_BOLD_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*\d+\.[ \t]+\*\*").expect("Failed to compile NUMBERED_BOLD_LINE_RE")
});

pub(crate) static LEGACY_HEADING_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*###[ \t]").expect("Failed to compile LEGACY_HEADING_LINE_RE")
});

const ITEM_INDENT: usize = 8;
const SECTION_INDENT: usize = 4;
const TRAILER: &str = "You can find";

// Title plus the description lines gathered so far.
type PendingItem = Option<(String, Vec<String>)>;

/// Splits a section body into `"Title: description"` items using the bullet
/// grammar of the convention the section was found with.
pub fn tokenize(section_body: &str, convention: Convention) -> Vec<String> {
    let items = match convention {
        Convention::NumberedBold | Convention::Legacy => tokenize_bold_bullets(section_body),
        Convention::IndentedPlain => tokenize_indented(section_body),
    };
    tracing::trace!("Tokenized {} item(s) using {:?}", items.len(), convention);
    items
}

fn flush(pending: &mut PendingItem, items: &mut Vec<String>) {
    if let Some((title, parts)) = pending.take() {
        let description = collapse_whitespace(&parts.join(" "));
        items.push(format!("{}: {}", title, description));
    }
}

fn tokenize_bold_bullets(body: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut pending: PendingItem = None;

    for line in body.lines() {
        if let Some(caps) = BOLD_BULLET_RE.captures(line) {
            flush(&mut pending, &mut items);
            pending = Some((caps[1].trim().to_string(), vec![caps[2].trim().to_string()]));
            continue;
        }

        let ends_item = line.trim().is_empty()
            || NUMBERED_BOLD_LINE_RE.is_match(line)
            || LEGACY_HEADING_LINE_RE.is_match(line);
        if ends_item {
            flush(&mut pending, &mut items);
        } else if let Some((_, parts)) = pending.as_mut() {
            parts.push(line.trim().to_string()); // Soft-wrapped description
        }
    }

    flush(&mut pending, &mut items);
    items
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

// `indent` spaces followed directly by an uppercase letter.
fn uppercase_at(line: &str, indent: usize) -> bool {
    leading_spaces(line) == indent
        && line[indent..].chars().next().map_or(false, char::is_uppercase)
}

fn tokenize_indented(body: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut pending: PendingItem = None;

    for line in body.lines() {
        let trimmed = line.trim();
        let indent = leading_spaces(line);

        if indent == ITEM_INDENT {
            if let Some((title, description)) = trimmed.split_once(':') {
                if !title.trim().is_empty() {
                    flush(&mut pending, &mut items);
                    pending = Some((title.trim().to_string(), vec![description.trim().to_string()]));
                    continue;
                }
            }
        }

        let ends_item = trimmed.is_empty()
            || indent >= ITEM_INDENT
            || uppercase_at(line, SECTION_INDENT)
            || uppercase_at(line, 0)
            || trimmed.starts_with(TRAILER);
        if ends_item {
            flush(&mut pending, &mut items);
        } else if let Some((_, parts)) = pending.as_mut() {
            parts.push(trimmed.to_string());
        }
    }

    flush(&mut pending, &mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_bullets_with_soft_wrap() {
        let body = "\n   - **Design Rationale**: Explain the\n     design approach.\n   - **Materials:** Brick.\n\nTrailing prose is ignored.";
        let items = tokenize(body, Convention::NumberedBold);
        assert_eq!(items, vec![
            "Design Rationale: Explain the design approach.",
            "Materials: Brick.",
        ]);
    }

    #[test]
    fn test_bold_bullets_stop_at_headings() {
        let body = "- **Habitat Impact**: Survey the site\n### Next Document\n- **Other**: x";
        let items = tokenize(body, Convention::Legacy);
        assert_eq!(items, vec!["Habitat Impact: Survey the site", "Other: x"]);
    }

    #[test]
    fn test_bold_bullet_without_description() {
        let items = tokenize("- **Protected Species**:", Convention::Legacy);
        assert_eq!(items, vec!["Protected Species: "]);
    }

    #[test]
    fn test_indented_items() {
        let body = concat!(
            "        Flood Zone Identification: Identify the zone.\n",
            "      Include maps.\n",
            "        Mitigation Measures: Describe measures.\n",
            "\n",
            "    Heritage Statement\n",
            "        Impact of Proposal: not part of this section\n",
        );
        let items = tokenize(body, Convention::IndentedPlain);
        assert_eq!(items, vec![
            "Flood Zone Identification: Identify the zone. Include maps.",
            "Mitigation Measures: Describe measures.",
            "Impact of Proposal: not part of this section",
        ], "Tokenizer works on whatever body it is given");
    }

    #[test]
    fn test_indented_ignores_other_indents() {
        let body = "          Deep: not an item\n    Planning: not an item\n        Real Item: yes\nYou can find templates below.";
        let items = tokenize(body, Convention::IndentedPlain);
        assert_eq!(items, vec!["Real Item: yes"]);
    }

    #[test]
    fn test_indented_stops_at_trailer() {
        let body = "        Habitat Impact: Provide detail\n  You can find the templates below.";
        let items = tokenize(body, Convention::IndentedPlain);
        assert_eq!(items, vec!["Habitat Impact: Provide detail"]);
    }
}
