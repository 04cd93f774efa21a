// src/response/mod.rs
pub mod loader;
pub mod models;

pub use loader::load_response;
pub use models::{
    DescribedTemplate,
    DocumentRecord,
    DocumentStatus,
    FixSection,
    MissingFieldEntry,
    ParsedReport,
    RawResponse,
    TemplateEntry,
};
