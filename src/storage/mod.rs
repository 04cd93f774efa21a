// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::response::models::ParsedReport;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    // /base_dir/<reference>/
    fn reference_dir(&self, reference: &str) -> Result<PathBuf, StorageError> {
        // Must name a single directory inside base_dir
        let unsafe_reference = reference.trim().is_empty()
            || reference.contains(&['/', '\\'][..])
            || reference.contains("..");
        if unsafe_reference {
            return Err(StorageError::InvalidReference(reference.to_string()));
        }

        let target_dir = self.base_dir.join(reference);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the parsed report as pretty JSON
    pub fn save_report(&self, reference: &str, report: &ParsedReport) -> Result<PathBuf, StorageError> {
        let file_path = self.reference_dir(reference)?.join(format!("{}_report.json", reference));

        let report_str = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, report_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves summary counts about the report in JSON format
    pub fn save_report_metadata(&self, reference: &str, report: &ParsedReport) -> Result<PathBuf, StorageError> {
        let file_path = self.reference_dir(reference)?.join(format!("{}_meta.json", reference));

        let metadata = serde_json::json!({
            "reference": reference,
            "documents": report.documents.len(),
            "complete_documents": report.complete_count(),
            "missing_documents": report.missing_documents().count(),
            "missing_field_files": report.missing_fields.len(),
            "fix_sections": report.fix_sections.len(),
            "templates": report.templates.len(),
            "permission_request": report.permission_request,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}
