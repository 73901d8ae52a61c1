//! Document engine abstraction.
//!
//! These traits are the only surface the classification and planning logic
//! sees of the underlying PDF engine. The production implementation lives in
//! [`super::secure`]; tests substitute in-memory pages.

use crate::error::RedactorResult;
use crate::geometry::Rect;
use std::path::Path;

/// A single page that can be searched and redacted.
pub trait RedactablePage {
    /// 0-based index of the page within its document.
    fn index(&self) -> usize;

    /// Full bounding rectangle of the page.
    fn mediabox(&self) -> RedactorResult<Rect>;

    /// Bounding rectangles of every literal occurrence of `needle`.
    ///
    /// Returns an empty vector when the text does not occur.
    fn search_text(&self, needle: &str) -> RedactorResult<Vec<Rect>>;

    /// Marks `rect` for removal on the next commit.
    fn mark_pending_redaction(&mut self, rect: Rect) -> RedactorResult<()>;

    /// Irreversibly burns every pending region and returns how many were burned.
    ///
    /// Committing with nothing pending is a no-op returning zero.
    fn commit_redactions(&mut self) -> RedactorResult<usize>;
}

/// An open document whose pages can be redacted and saved.
pub trait RedactableDocument {
    type Page: RedactablePage;

    fn page_count(&self) -> RedactorResult<usize>;

    fn load_page(&self, index: usize) -> RedactorResult<Self::Page>;

    /// Writes the document, including committed redactions, to `path`.
    fn save(&self, path: &Path) -> RedactorResult<()>;
}

/// Opens documents for redaction.
pub trait DocumentEngine {
    type Document: RedactableDocument;

    fn open(&self, path: &Path) -> RedactorResult<Self::Document>;

    /// Human-readable engine name for diagnostics.
    fn name(&self) -> &str;
}
