// src/extractors/section.rs

// --- Imports ---
use crate::extractors::catalog::CatalogEntry;
use crate::extractors::tokenizer::{tokenize, LEGACY_HEADING_LINE_RE, NUMBERED_BOLD_LINE_RE};
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
static NUMBERED_BOLD_ANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+\*\*").expect("Failed to compile NUMBERED_BOLD_ANY_RE")
});

static LEGACY_HEADING_ANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*###[ \t]").expect("Failed to compile LEGACY_HEADING_ANY_RE")
});

static TRAILER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)you can find").expect("Failed to compile TRAILER_RE")
});

/// The heading/bullet styles the agent formats per-document guidance with.
///
/// - `NumberedBold`: `1. **Doc Name**` then `- **Field**: text` bullets.
/// - `IndentedPlain`: `Doc Name` on its own line then `        Field: text` lines.
/// - `Legacy`: `### Doc Name` then `- **Field**: text` bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    NumberedBold,
    IndentedPlain,
    Legacy,
}

impl Convention {
    /// First convention that yields items wins.
    pub const TRY_ORDER: [Convention; 3] =
        [Convention::NumberedBold, Convention::IndentedPlain, Convention::Legacy];

    fn heading_pattern(self, doc_name: &str) -> String {
        let name = regex::escape(doc_name);
        match self {
            Convention::NumberedBold => format!(r"(?im)^[ \t]*\d+\.[ \t]+\*\*[ \t]*{}[ \t]*\*\*", name),
            Convention::IndentedPlain => format!(r"(?im)^[ \t]*{}[ \t]*\r?\n", name),
            Convention::Legacy => format!(r"(?im)^[ \t]*###[ \t]*{}[ \t]*\r?$", name),
        }
    }

    /// Finds `doc_name`'s heading in this style and returns the body under it.
    pub fn locate<'a>(self, doc_name: &str, text: &'a str) -> Option<&'a str> {
        let pattern = self.heading_pattern(doc_name);
        let heading_re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!("Could not build {:?} heading pattern for '{}': {}", self, doc_name, e);
                return None;
            }
        };

        let heading = heading_re.find(text)?;
        let rest = &text[heading.end()..];
        let end = match self {
            Convention::NumberedBold => {
                let next_heading = NUMBERED_BOLD_ANY_RE.find(rest).map(|m| m.start());
                let trailer = TRAILER_RE.find(rest).map(|m| m.start());
                [next_heading, trailer].into_iter().flatten().min().unwrap_or(rest.len())
            }
            Convention::IndentedPlain => indented_section_end(rest),
            Convention::Legacy => LEGACY_HEADING_ANY_RE.find(rest).map_or(rest.len(), |m| m.start()),
        };

        tracing::trace!("{:?} heading for '{}' found, body is {} bytes", self, doc_name, end);
        Some(&rest[..end])
    }
}

// The body stops at a 4-space-indented or unindented line starting with an uppercase letter.
fn indented_section_end(rest: &str) -> usize {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let indent = line.len() - line.trim_start_matches(' ').len();
        let starts_upper = line[indent..].chars().next().map_or(false, char::is_uppercase);
        if starts_upper && (indent == 4 || indent == 0) {
            return offset;
        }
        offset += line.len();
    }
    rest.len()
}

/// Returns the body of `doc_name`'s section in the given convention, if present.
pub fn extract_section<'a>(doc_name: &str, text: &'a str, convention: Convention) -> Option<&'a str> {
    convention.locate(doc_name, text)
}

/// Pulls the `"Title: description"` guidance items listed under `doc_name`.
///
/// Each convention is tried in [`Convention::TRY_ORDER`]; a convention whose
/// heading matches but whose body yields no items falls through to the next.
/// Returns an empty list when nothing matches.
pub fn extract_guidance(doc_name: &str, response_text: &str) -> Vec<String> {
    for convention in Convention::TRY_ORDER {
        if let Some(body) = convention.locate(doc_name, response_text) {
            let items = tokenize(body, convention);
            if !items.is_empty() {
                tracing::debug!("Found {} guidance item(s) for '{}' using {:?}", items.len(), doc_name, convention);
                return items;
            }
            tracing::trace!("{:?} heading for '{}' had no items", convention, doc_name);
        }
    }
    Vec::new()
}

/// Guidance for a catalog document, trying its catalog name then each alias.
pub fn extract_entry_guidance(entry: &CatalogEntry, response_text: &str) -> Vec<String> {
    entry
        .section_names()
        .map(|name| extract_guidance(name, response_text))
        .find(|items| !items.is_empty())
        .unwrap_or_default()
}

/// True if the line opens any convention's section, whatever document it names.
pub(crate) fn is_convention_heading(line: &str) -> bool {
    NUMBERED_BOLD_LINE_RE.is_match(line) || LEGACY_HEADING_LINE_RE.is_match(line)
}
