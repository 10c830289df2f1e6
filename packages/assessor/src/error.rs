//! Error types for the assessor.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the assessor library.
#[derive(Debug, Error)]
pub enum AssessorError {
    /// Input directory is missing or not a directory.
    #[error("Input path is not a readable directory: {}", .0.display())]
    InvalidInputDir(PathBuf),

    /// HTTP client construction failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    /// Interactive prompt failed or was aborted.
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Result type alias for assessor operations.
pub type Result<T> = std::result::Result<T, AssessorError>;
