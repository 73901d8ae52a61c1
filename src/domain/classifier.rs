//! Page classification by header.

use crate::error::RedactorResult;
use crate::redaction::engine::RedactablePage;

/// Whether a page follows the known payslip layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    Expected,
    Unexpected,
}

/// Classifies `page` by searching for the literal `header`.
///
/// Any number of header matches makes the page `Expected`.
pub fn classify<P: RedactablePage + ?Sized>(page: &P, header: &str) -> RedactorResult<PageLayout> {
    let hits = page.search_text(header)?;
    Ok(if hits.is_empty() {
        PageLayout::Unexpected
    } else {
        PageLayout::Expected
    })
}
