//! Payslip template knowledge.
//!
//! This module holds the one document layout the tool recognizes and the
//! logic that reads a page against it: header classification and
//! label-anchored field location.

pub mod classifier;
pub mod locator;

pub use classifier::{classify, PageLayout};
pub use locator::{locate, locate_field};

use crate::geometry::Rect;

/// A sensitive value printed to the right of a fixed label.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Short name used in diagnostics.
    pub name: &'static str,

    /// Equivalent literal forms of the label, in search order.
    ///
    /// The first entry is the canonical label used in error messages.
    pub label_variants: &'static [&'static str],

    /// Width of the value window to the right of the label.
    pub value_width: f32,
}

impl FieldSpec {
    pub fn primary_label(&self) -> &'static str {
        self.label_variants.first().copied().unwrap_or_default()
    }
}

/// Layout constants for one payslip template.
#[derive(Debug, Clone, Copy)]
pub struct PayslipTemplate {
    /// Literal header that identifies a page as belonging to this template.
    pub header: &'static str,

    /// Social-security number field.
    pub ssn: FieldSpec,

    /// Fixed region covering the employee's home address block.
    pub address: Rect,
}

const ADDRESS_LEFT: f32 = 270.0;
const ADDRESS_TOP: f32 = 90.0;
const ADDRESS_WIDTH: f32 = 260.0;
const ADDRESS_HEIGHT: f32 = 100.0;

/// Address block of the payslip template.
///
/// The block has no label to anchor a search on, so its position is taken
/// from the template's physical layout. Payslips whose address is printed
/// elsewhere are not covered by this rectangle.
pub const ADDRESS_RECT: Rect = Rect::new(
    ADDRESS_LEFT,
    ADDRESS_TOP,
    ADDRESS_LEFT + ADDRESS_WIDTH,
    ADDRESS_TOP + ADDRESS_HEIGHT,
);

/// Social-security number, found after the `N° SS :` label.
///
/// Some generators emit the degree sign as UTF-8 bytes read back as Latin-1,
/// which extracts as `NÂ°`.
pub const SSN_FIELD: FieldSpec = FieldSpec {
    name: "social-security number",
    label_variants: &["N° SS :", "NÂ° SS :"],
    value_width: 120.0,
};

/// The payslip layout handled by this crate.
pub const PAYSLIP_TEMPLATE: PayslipTemplate = PayslipTemplate {
    header: "BULLETIN DE SALAIRE",
    ssn: SSN_FIELD,
    address: ADDRESS_RECT,
};

impl Default for PayslipTemplate {
    fn default() -> Self {
        PAYSLIP_TEMPLATE
    }
}
