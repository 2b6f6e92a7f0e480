//! Unified error type for deck assembly.
//!
//! Lower layers (OPC packaging, PresentationML parts) keep their own error
//! enums; everything surfaces to callers as [`Error`].
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deckgen operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Part or relationship not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// The donor template could not be opened or its slide structure is
    /// inconsistent. Nothing is written when this is returned.
    #[error("Donor template {} is unreadable or corrupt: {reason}", path.display())]
    DonorCorrupt { path: PathBuf, reason: String },

    /// The working document exposes no slide layout at all.
    #[error("Template has no slide layouts")]
    NoLayout,

    /// The content provider produced nothing usable.
    #[error("Content generation failed: {0}")]
    ContentGeneration(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap any failure while opening or inspecting a donor template.
    pub fn donor_corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::DonorCorrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for deckgen operations.
pub type Result<T> = std::result::Result<T, Error>;
