// src/response/models.rs
use serde::{Deserialize, Serialize};

// Phrases the agent uses when it needs the user to grant it access first.
const PERMISSION_PHRASES: [&str; 3] = ["additional permissions", "connect", "sign in"];

/// The text fragments the agent sent back for one status-check query, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub fragments: Vec<String>,
}

impl RawResponse {
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fragments: fragments.into_iter().map(Into::into).collect() }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { fragments: vec![text.into()] }
    }

    /// The single string every extraction stage reads: fragments joined by newlines.
    pub fn joined(&self) -> String {
        self.fragments.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|f| f.trim().is_empty())
    }

    /// True when any fragment asks the user to sign in or grant permissions
    /// rather than answering the query.
    pub fn has_permission_request(&self) -> bool {
        self.fragments.iter().any(|fragment| {
            let lower = fragment.to_lowercase();
            PERMISSION_PHRASES.iter().any(|phrase| lower.contains(phrase))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Complete,
    Missing,
    Partial,
}

/// Verdict for one catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub name: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

/// Guidance for one file (or the generic fallback topic) from a HOW TO FIX section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSection {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFieldEntry {
    pub filename: String,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub filename: String,
}

/// A template listing together with the description found for it in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribedTemplate {
    #[serde(flatten)]
    pub template: TemplateEntry,
    pub description: String,
}

/// Everything the pipeline pulls out of one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    pub documents: Vec<DocumentRecord>,
    pub missing_fields: Vec<MissingFieldEntry>,
    pub fix_sections: Vec<FixSection>,
    pub templates: Vec<DescribedTemplate>,
    pub permission_request: bool,
}

impl ParsedReport {
    pub fn missing_documents(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.iter().filter(|d| d.status == DocumentStatus::Missing)
    }

    pub fn complete_count(&self) -> usize {
        self.documents.iter().filter(|d| d.status == DocumentStatus::Complete).count()
    }
}
