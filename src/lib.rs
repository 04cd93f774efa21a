// src/lib.rs
//! Turns the free-text answers of a planning-portal assistant into structured
//! document verdicts, missing-field lists, fix guidance and template listings.

pub mod extractors;
pub mod response;
pub mod storage;
pub mod utils;

pub use extractors::{ParserConfig, ResponseParser};
pub use response::{load_response, ParsedReport, RawResponse};
pub use storage::StorageManager;
pub use utils::AppError;
