// src/extractors/pipeline.rs

// --- Imports ---
use crate::extractors::classifier::{classify_with, DetailSource, LabelledDetails};
use crate::extractors::config::ParserConfig;
use crate::extractors::fix_guidance::{parse_how_to_fix, FIX_HEADER_PHRASES};
use crate::extractors::missing_fields::{parse_missing_fields, MISSING_FIELDS_HEADER};
use crate::extractors::templates::{get_document_description, parse_document_templates, TEMPLATES_HEADER};
use crate::response::models::{DescribedTemplate, ParsedReport, RawResponse};

/// Runs every extraction stage over one agent response.
pub struct ResponseParser {
    config: ParserConfig,
    details: Box<dyn DetailSource + Send + Sync>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl ResponseParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config, details: Box::new(LabelledDetails) }
    }

    /// Replaces the default [`LabelledDetails`] source.
    pub fn with_details<D>(mut self, details: D) -> Self
    where
        D: DetailSource + Send + Sync + 'static,
    {
        self.details = Box::new(details);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, response: &RawResponse) -> ParsedReport {
        self.parse_text(&response.joined(), response.has_permission_request())
    }

    fn parse_text(&self, text: &str, permission_request: bool) -> ParsedReport {
        tracing::info!("Parsing bot response ({} bytes)", text.len());

        let documents = classify_with(text, self.details.as_ref());
        let missing_fields = parse_missing_fields(text, &self.config);
        let fix_sections = parse_how_to_fix(text, &missing_fields, &self.config);
        let templates = parse_document_templates(text, &self.config)
            .into_iter()
            .map(|template| DescribedTemplate {
                description: get_document_description(&template.name, text, &self.config),
                template,
            })
            .collect();

        let report = ParsedReport {
            documents,
            missing_fields,
            fix_sections,
            templates,
            permission_request,
        };
        tracing::info!(
            "Parsed report: {} complete, {} missing, {} fix section(s), {} template(s)",
            report.complete_count(),
            report.missing_documents().count(),
            report.fix_sections.len(),
            report.templates.len()
        );
        report
    }
}

/// `(pattern, kind)` pairs for every heading shape the scanners react to,
/// for the annotated debug dump.
pub fn debug_patterns() -> Vec<(String, &'static str)> {
    let mut patterns = vec![
        (format!(r"(?m)^.*{}.*$", MISSING_FIELDS_HEADER), "missing-fields"),
        (format!(r"(?mi)^.*{}.*$", TEMPLATES_HEADER), "templates"),
        (r"(?m)^[ \t]*\d+\.[ \t]+\*\*.+$".to_string(), "numbered-bold"),
        (r"(?m)^[ \t]*###[ \t].+$".to_string(), "legacy-heading"),
        (r"(?m)^ {8}[^ :][^:\n]*:".to_string(), "indented-item"),
        (r"(?m)^[ \t]*\d+[.)][ \t]+[\w.\-]+\.txt".to_string(), "file"),
    ];
    for phrase in FIX_HEADER_PHRASES {
        patterns.push((format!(r"(?m)^.*{}.*$", phrase), "fix-guidance"));
    }
    patterns
}
