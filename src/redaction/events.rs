//! Diagnostics raised while a batch runs.
//!
//! The batch never writes to the console itself. It hands each event to an
//! [`EventSink`] so embedding callers decide where the events go.

use crate::error::RedactorError;
use std::path::{Path, PathBuf};

/// Something worth telling the user about a document or page.
#[derive(Debug)]
pub enum RedactionEvent<'a> {
    /// Page did not match the template and was redacted in full.
    PageFullyRedacted {
        path: &'a Path,
        page: usize,
        reason: &'a str,
    },

    /// A payslip page failed to resolve a field and was redacted in full instead.
    FieldFallback {
        path: &'a Path,
        page: usize,
        error: &'a RedactorError,
    },

    /// Glob pattern matched no files.
    NoMatches { pattern: &'a str },

    /// A path under a glob pattern could not be read and was skipped.
    UnreadableMatch {
        pattern: &'a str,
        path: &'a Path,
        error: &'a std::io::Error,
    },

    /// Document was redacted and saved.
    DocumentSaved { input: &'a Path, output: &'a Path },

    /// Document failed and no output was written for it.
    DocumentFailed {
        input: &'a Path,
        error: &'a RedactorError,
    },
}

/// Receives diagnostics from a redaction run.
pub trait EventSink {
    fn report(&mut self, event: &RedactionEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn report(&mut self, event: &RedactionEvent<'_>) {
        match event {
            RedactionEvent::PageFullyRedacted { path, page, reason } => {
                tracing::info!(
                    file = %path.display(),
                    page = page + 1,
                    "page {} has an unexpected format and will be fully redacted: {}",
                    page + 1,
                    reason
                );
            }
            RedactionEvent::FieldFallback { path, page, error } => {
                tracing::warn!(
                    file = %path.display(),
                    page = page + 1,
                    "{error}; redacting the whole page instead"
                );
            }
            RedactionEvent::NoMatches { pattern } => {
                tracing::warn!(pattern, "input pattern matched no files");
            }
            RedactionEvent::UnreadableMatch {
                pattern,
                path,
                error,
            } => {
                tracing::warn!(pattern, path = %path.display(), "skipping unreadable path: {error}");
            }
            RedactionEvent::DocumentSaved { input, output } => {
                tracing::info!(
                    input = %input.display(),
                    output = %output.display(),
                    "saved redacted document"
                );
            }
            RedactionEvent::DocumentFailed { input, error } => {
                tracing::error!(file = %input.display(), "{error}; document not saved");
            }
        }
    }
}

/// Owned copy of an event, for sinks that keep what they receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    PageFullyRedacted { path: PathBuf, page: usize },
    FieldFallback { path: PathBuf, page: usize, message: String },
    NoMatches { pattern: String },
    UnreadableMatch { pattern: String, path: PathBuf },
    DocumentSaved { input: PathBuf, output: PathBuf },
    DocumentFailed { input: PathBuf, message: String },
}

impl From<&RedactionEvent<'_>> for RecordedEvent {
    fn from(event: &RedactionEvent<'_>) -> Self {
        match *event {
            RedactionEvent::PageFullyRedacted { path, page, .. } => Self::PageFullyRedacted {
                path: path.to_path_buf(),
                page,
            },
            RedactionEvent::FieldFallback { path, page, error } => Self::FieldFallback {
                path: path.to_path_buf(),
                page,
                message: error.to_string(),
            },
            RedactionEvent::NoMatches { pattern } => Self::NoMatches {
                pattern: pattern.to_string(),
            },
            RedactionEvent::UnreadableMatch { pattern, path, .. } => Self::UnreadableMatch {
                pattern: pattern.to_string(),
                path: path.to_path_buf(),
            },
            RedactionEvent::DocumentSaved { input, output } => Self::DocumentSaved {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            },
            RedactionEvent::DocumentFailed { input, error } => Self::DocumentFailed {
                input: input.to_path_buf(),
                message: error.to_string(),
            },
        }
    }
}

/// Sink that stores every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<RecordedEvent>,
}

impl EventSink for RecordingSink {
    fn report(&mut self, event: &RedactionEvent<'_>) {
        self.events.push(event.into());
    }
}
