// src/extractors/classifier.rs

// --- Imports ---
use crate::extractors::catalog::{CatalogEntry, CompletionRule, CATALOG, NEGATIVE_MARKER};
use crate::extractors::section::extract_entry_guidance;
use crate::response::models::{DocumentRecord, DocumentStatus};
use regex::Regex;

/// Supplies the human-readable details shown under a catalog document.
pub trait DetailSource {
    /// `None` when the response carries nothing that confirms this document's details.
    fn details(&self, entry: &CatalogEntry, response_text: &str) -> Option<Vec<String>>;
}

/// Reads `Label: value` pairs for the entry's detail labels out of the part of
/// the response that talks about that document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelledDetails;

impl DetailSource for LabelledDetails {
    fn details(&self, entry: &CatalogEntry, response_text: &str) -> Option<Vec<String>> {
        if entry.detail_labels.is_empty() {
            return None;
        }
        let window = document_window(entry, response_text)?;

        let found: Vec<String> = entry
            .detail_labels
            .iter()
            .filter_map(|label| find_labelled_value(label, window).map(|value| format!("{}: {}", label, value)))
            .collect();

        if found.is_empty() {
            None
        } else {
            tracing::debug!("Found {} detail(s) for '{}'", found.len(), entry.name);
            Some(found)
        }
    }
}

// From the entry's marker up to the next marker of any other catalog document.
fn document_window<'a>(entry: &CatalogEntry, text: &'a str) -> Option<&'a str> {
    let start = text.find(entry.marker)?;
    let after_marker = start + entry.marker.len();
    let rest = &text[after_marker..];

    let end = CATALOG
        .iter()
        .filter(|other| other.marker != entry.marker)
        .filter_map(|other| rest.find(other.marker))
        .min()
        .unwrap_or(rest.len());

    Some(&text[start..after_marker + end])
}

fn find_labelled_value(label: &str, window: &str) -> Option<String> {
    let pattern = format!(r"(?im)\b{}[ \t]*:[ \t]*([^\n;|]+)", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(window)?.get(1)?.as_str().trim().trim_end_matches('.').trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn completion_status(entry: &CatalogEntry, response_text: &str) -> DocumentStatus {
    let present = response_text.contains(entry.marker);
    let complete = match entry.rule {
        CompletionRule::Presence => present,
        CompletionRule::PresenceWithoutNegative => present && !response_text.contains(NEGATIVE_MARKER),
    };
    if complete {
        DocumentStatus::Complete
    } else {
        DocumentStatus::Missing
    }
}

fn classify_entry(entry: &CatalogEntry, response_text: &str, details: &dyn DetailSource) -> DocumentRecord {
    let status = completion_status(entry, response_text);

    let missing_fields = entry.default_missing_fields.map(|defaults| {
        let extracted = extract_entry_guidance(entry, response_text);
        if extracted.is_empty() {
            tracing::trace!("No guidance parsed for '{}', using default fields", entry.name);
            defaults.iter().map(|f| f.to_string()).collect()
        } else {
            extracted
        }
    });

    DocumentRecord {
        name: entry.name.to_string(),
        status,
        details: details.details(entry, response_text),
        missing_fields,
    }
}

/// One record per catalog document, in catalog order, using [`LabelledDetails`].
pub fn classify(response_text: &str) -> Vec<DocumentRecord> {
    classify_with(response_text, &LabelledDetails)
}

pub fn classify_with(response_text: &str, details: &dyn DetailSource) -> Vec<DocumentRecord> {
    let records: Vec<DocumentRecord> = CATALOG
        .iter()
        .map(|entry| classify_entry(entry, response_text, details))
        .collect();

    tracing::debug!(
        "Classified {} documents, {} complete",
        records.len(),
        records.iter().filter(|r| r.status == DocumentStatus::Complete).count()
    );
    records
}
