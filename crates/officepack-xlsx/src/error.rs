//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The file is not an office document container
    #[error("Not an office document: {0}")]
    NotAContainer(String),

    /// The document kind is unknown or has no reader/writer
    #[error("Unsupported document kind: {0}")]
    UnsupportedDocumentKind(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// A part is present but could not be parsed
    #[error("Malformed part {part}: {reason}")]
    MalformedPart {
        /// Archive entry name
        part: String,
        /// What went wrong
        reason: String,
    },

    /// A sheet name that cannot be written
    #[error("Invalid sheet name: {0:?}")]
    InvalidSheetName(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] officepack_core::Error),
}

impl XlsxError {
    /// Create a [`XlsxError::MalformedPart`]
    pub fn malformed<P: Into<String>, R: ToString>(part: P, reason: R) -> Self {
        XlsxError::MalformedPart {
            part: part.into(),
            reason: reason.to_string(),
        }
    }
}
