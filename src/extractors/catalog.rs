// src/extractors/catalog.rs
//! The fixed set of planning-application documents every status check reports on.

/// Negative marker that downgrades a guidance document to missing.
pub const NEGATIVE_MARKER: &str = "Missing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionRule {
    /// Complete when the marker appears anywhere.
    Presence,
    /// Complete when the marker appears and [`NEGATIVE_MARKER`] does not.
    PresenceWithoutNegative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub marker: &'static str,
    pub rule: CompletionRule,
    /// `Label:` values looked up in this document's part of the response.
    pub detail_labels: &'static [&'static str],
    /// Fields reported when no guidance section can be parsed. `None` for
    /// documents that carry no field guidance.
    pub default_missing_fields: Option<&'static [&'static str]>,
    /// Other headings the agent uses for this document's guidance section.
    pub section_aliases: &'static [&'static str],
}

impl CatalogEntry {
    pub fn is_guidance_document(&self) -> bool {
        self.default_missing_fields.is_some()
    }

    /// Headings to try, in order, when locating this document's guidance.
    pub fn section_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.section_aliases.iter().copied())
    }
}

const fn plain(name: &'static str, marker: &'static str, detail_labels: &'static [&'static str]) -> CatalogEntry {
    CatalogEntry {
        name,
        marker,
        rule: CompletionRule::Presence,
        detail_labels,
        default_missing_fields: None,
        section_aliases: &[],
    }
}

const fn guidance(
    name: &'static str,
    marker: &'static str,
    default_missing_fields: &'static [&'static str],
    section_aliases: &'static [&'static str],
) -> CatalogEntry {
    CatalogEntry {
        name,
        marker,
        rule: CompletionRule::PresenceWithoutNegative,
        detail_labels: &[],
        default_missing_fields: Some(default_missing_fields),
        section_aliases,
    }
}

// Order here is the order of every classification result.
pub static CATALOG: [CatalogEntry; 14] = [
    plain("Application Form", "Planning Application Form", &["Applicant", "Site", "Description", "Certificate"]),
    plain("Location Plan", "Location Plan", &["Map Scale", "North Arrow", "Site Boundary"]),
    plain("Block/Site Plan", "Block Plan", &["Map Scale", "Extension", "North Arrow"]),
    plain("Elevations", "Elevations", &["Scale", "Height", "Materials"]),
    plain("Floor Plans", "Floor Plans", &["Scale", "Existing Layout", "Proposed Layout"]),
    plain("Ownership Certificate", "Ownership Certificate", &["Certificate", "Signed", "Date"]),
    plain("Agricultural Holdings Certificate", "Agricultural Holdings Certificate", &["Holding Status", "Signed", "Date"]),
    plain("CIL Form 1", "CIL Form 1", &["Planning Application No", "Existing Floor Area", "Proposed Floor Area", "Development Type"]),
    guidance(
        "Design and Access Statement",
        "Design and Access Statement",
        &["Design Rationale", "Materials and Appearance", "Accessibility (if relevant)"],
        &[],
    ),
    guidance(
        "Planning Statement",
        "Planning Statement",
        &["Summary of Proposed Works", "Compliance with Local Policies"],
        &[],
    ),
    guidance(
        "Flood Risk Assessment",
        "Flood Risk Assessment",
        &["Flood Zone Identification", "Mitigation Measures", "Surface Water Drainage Plan"],
        &[],
    ),
    guidance(
        "Heritage Statement",
        "Heritage Statement",
        &["Description of Heritage Asset", "Impact of Proposal", "Justification for Works"],
        &[],
    ),
    guidance(
        "Tree Survey/Arboricultural Report",
        "Tree Survey",
        &["Tree Locations and Species", "Root Protection Areas", "Impact of Proposed Work"],
        &["Tree Survey or Arboricultural Report", "Tree Survey"],
    ),
    guidance(
        "Biodiversity/Ecology Report",
        "Biodiversity",
        &["Habitat Impact", "Protected Species", "Mitigation Plans"],
        &["Biodiversity or Ecology Report", "Biodiversity Report"],
    ),
];

pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name.eq_ignore_ascii_case(name))
}
