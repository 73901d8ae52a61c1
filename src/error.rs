//! Error types for payslip redaction.
//!
//! Errors carry the context needed to report a failure to the user
//! (file path, page, label) so callers never have to consult ambient state
//! to build a message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for redaction operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Error type for every stage of a redaction pass.
///
/// Page numbers are stored 0-based and displayed 1-based.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Input is missing or is not a readable PDF
    #[error("Failed to open '{}': {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    /// An expected field label is absent on a page classified as a payslip
    #[error("Could not find field label '{label}' on page {}", .page + 1)]
    FieldNotFound { page: usize, label: String },

    /// A field label matched more than once, so the value cannot be located safely
    #[error("Found {count} regions with text '{label}' on page {}", .page + 1)]
    FieldAmbiguous {
        page: usize,
        label: String,
        count: usize,
    },

    /// The sanitized document could not be written
    #[error("Failed to save '{}': {reason}", .path.display())]
    Save { path: PathBuf, reason: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Text extraction failed
    #[error("Text extraction failed for '{}': {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// Document engine failure outside of open/save
    #[error("MuPDF backend error{}: {message}", on_page(.page))]
    Backend {
        message: String,
        page: Option<usize>,
    },
}

fn on_page(page: &Option<usize>) -> String {
    page.map(|p| format!(" on page {}", p + 1)).unwrap_or_default()
}

impl RedactorError {
    /// Returns true for failures caused by a page not resolving its fields.
    pub fn is_field_failure(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound { .. } | Self::FieldAmbiguous { .. }
        )
    }

    /// Returns the 0-based page the error refers to, if any.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::FieldNotFound { page, .. } | Self::FieldAmbiguous { page, .. } => Some(*page),
            Self::Backend { page, .. } => *page,
            _ => None,
        }
    }
}
