use ecoscan_common::{ClassificationError, SelectError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoScanError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("No images found in: {0}")]
    NoImagesFound(String),

    #[error(transparent)]
    Selection(#[from] SelectError),

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Reference data error: {0}")]
    Reference(#[from] ecoscan_common::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EcoScanError>;
