//! Redaction of social-security numbers and home addresses from payslips.
//!
//! Each page of a payslip PDF is classified by its header. Pages that follow
//! the known template have two regions burned: the value after the
//! `N° SS :` label and the fixed address block. Any other page is burned in
//! full. Redaction goes through MuPDF, so the removed content is physically
//! gone from the saved file.
//!
//! # Architecture
//!
//! - [`domain`]: template constants, page classification, field location
//! - [`redaction`]: planning, the engine seam, the MuPDF engine, batch runs
//! - [`inputs`]: literal path and glob expansion
//! - [`error`]: error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use payslip_redactor::{BatchRedactor, RedactorConfig, TracingSink};
//! use std::path::PathBuf;
//!
//! let redactor = BatchRedactor::with_mupdf(RedactorConfig::new().with_output_dir("shared"));
//! let report = redactor.run(&[PathBuf::from("payslip.pdf")], &mut TracingSink);
//! assert!(!report.has_failures());
//! ```
//!
//! # Planning a page
//!
//! ```
//! use payslip_redactor::domain::{locate_field, SSN_FIELD};
//! use payslip_redactor::geometry::Rect;
//! use payslip_redactor::redaction::RedactablePage;
//! use payslip_redactor::RedactorResult;
//!
//! struct OneLabel;
//!
//! impl RedactablePage for OneLabel {
//!     fn index(&self) -> usize { 0 }
//!     fn mediabox(&self) -> RedactorResult<Rect> { Ok(Rect::new(0.0, 0.0, 595.0, 842.0)) }
//!     fn search_text(&self, needle: &str) -> RedactorResult<Vec<Rect>> {
//!         Ok(match needle {
//!             "N° SS :" => vec![Rect::new(40.0, 250.0, 78.0, 260.0)],
//!             _ => Vec::new(),
//!         })
//!     }
//!     fn mark_pending_redaction(&mut self, _: Rect) -> RedactorResult<()> { Ok(()) }
//!     fn commit_redactions(&mut self) -> RedactorResult<usize> { Ok(0) }
//! }
//!
//! let value = locate_field(&OneLabel, &SSN_FIELD).unwrap();
//! assert_eq!(value, Rect::new(81.0, 250.0, 201.0, 260.0));
//! ```

pub mod domain;
pub mod error;
pub mod geometry;
pub mod inputs;
pub mod redaction;

pub use domain::{PageLayout, PayslipTemplate, PAYSLIP_TEMPLATE};
pub use error::{RedactorError, RedactorResult};
pub use geometry::Rect;
pub use inputs::resolve_inputs;
pub use redaction::{
    extract_text, BatchRedactor, BatchReport, DocumentOutcome, DocumentSummary, EventSink,
    FieldFailurePolicy, MuPdfEngine, RedactionEvent, RedactionPlan, RedactionPlanner,
    RedactorConfig, TracingSink,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redactor_creation() {
        let redactor = BatchRedactor::with_mupdf(RedactorConfig::default());
        assert_eq!(redactor.config().suffix, "_redacted");
    }
}
