// src/utils/error.rs
use thiserror::Error;

// The extraction stages never fail; these cover everything around them.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read response: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode response JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported response JSON layout: {0}")]
    Layout(String),

    #[error("Response contains no text: {0}")]
    Empty(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid application reference: '{0}'")]
    InvalidReference(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Loading bot response failed: {0}")]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
