//! Per-page redaction planning.

use crate::domain::{classify, locate_field, PageLayout, PayslipTemplate};
use crate::error::RedactorResult;
use crate::geometry::Rect;
use crate::redaction::engine::RedactablePage;

/// Regions to burn on one page.
///
/// A plan is applied in full: either the whole page, or exactly the
/// resolved field regions.
#[derive(Debug, Clone, PartialEq)]
pub enum RedactionPlan {
    /// Page did not match the template; its whole mediabox is redacted.
    FullPage(Rect),

    /// Page matched the template; only the sensitive fields are redacted.
    Fields(Vec<Rect>),
}

impl RedactionPlan {
    pub fn regions(&self) -> &[Rect] {
        match self {
            Self::FullPage(rect) => std::slice::from_ref(rect),
            Self::Fields(rects) => rects,
        }
    }

    pub fn is_full_page(&self) -> bool {
        matches!(self, Self::FullPage(_))
    }
}

/// What to do when a payslip page is missing a field or has it twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldFailurePolicy {
    /// Stop the document; it is not saved.
    #[default]
    AbortDocument,

    /// Redact the offending page in full and continue.
    RedactFullPage,
}

/// Decides what to redact on each page of a payslip.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionPlanner {
    template: PayslipTemplate,
}

impl RedactionPlanner {
    pub fn new(template: PayslipTemplate) -> Self {
        Self { template }
    }

    /// Plans one page, propagating field location failures.
    pub fn plan<P: RedactablePage + ?Sized>(&self, page: &P) -> RedactorResult<RedactionPlan> {
        match classify(page, self.template.header)? {
            PageLayout::Unexpected => Ok(RedactionPlan::FullPage(page.mediabox()?)),
            PageLayout::Expected => {
                let ssn = locate_field(page, &self.template.ssn)?;
                Ok(RedactionPlan::Fields(vec![ssn, self.template.address]))
            }
        }
    }
}
