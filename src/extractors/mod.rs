// src/extractors/mod.rs
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod fix_guidance;
pub mod markdown;
pub mod missing_fields;
pub mod pipeline;
pub mod section;
pub mod templates;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export key extraction types for convenience
pub use catalog::{CatalogEntry, CompletionRule, CATALOG};
pub use classifier::{classify, classify_with, DetailSource, LabelledDetails};
pub use config::ParserConfig;
pub use fix_guidance::parse_how_to_fix;
pub use missing_fields::parse_missing_fields;
pub use pipeline::ResponseParser;
pub use section::{extract_guidance, extract_section, Convention};
pub use templates::{get_document_description, parse_document_templates};
