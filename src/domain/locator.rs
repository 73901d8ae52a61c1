//! Label-anchored field location.
//!
//! A field's printed value sits on the same text line as its label, a small
//! gap to the right. The value window has a fixed width per field, wide
//! enough for any value but short of the next column.

use super::FieldSpec;
use crate::error::{RedactorError, RedactorResult};
use crate::geometry::Rect;
use crate::redaction::engine::RedactablePage;

/// Horizontal gap between the end of a label and the start of its value.
pub const LABEL_VALUE_GAP: f32 = 3.0;

/// Resolves the value rectangle following the single occurrence of `label`.
///
/// # Errors
/// - [`RedactorError::FieldNotFound`] when the label does not occur
/// - [`RedactorError::FieldAmbiguous`] when it occurs more than once
pub fn locate<P: RedactablePage + ?Sized>(
    page: &P,
    label: &str,
    value_width: f32,
) -> RedactorResult<Rect> {
    let hits = page.search_text(label)?;
    match hits.as_slice() {
        [] => Err(RedactorError::FieldNotFound {
            page: page.index(),
            label: label.to_string(),
        }),
        [label_rect] => Ok(value_rect(label_rect, value_width)),
        _ => Err(RedactorError::FieldAmbiguous {
            page: page.index(),
            label: label.to_string(),
            count: hits.len(),
        }),
    }
}

/// Resolves `field` across all of its label variants.
///
/// Every variant is searched. A variant matching more than once makes the
/// field ambiguous even if another variant matched exactly once. Otherwise
/// the first variant with a single match wins.
pub fn locate_field<P: RedactablePage + ?Sized>(
    page: &P,
    field: &FieldSpec,
) -> RedactorResult<Rect> {
    let mut resolved = None;

    for label in field.label_variants {
        match locate(page, label, field.value_width) {
            Ok(rect) => {
                if resolved.is_none() {
                    tracing::debug!(field = field.name, label, page = page.index() + 1, "located field");
                    resolved = Some(rect);
                }
            }
            Err(RedactorError::FieldNotFound { .. }) => {}
            Err(err) => return Err(err),
        }
    }

    resolved.ok_or_else(|| RedactorError::FieldNotFound {
        page: page.index(),
        label: field.primary_label().to_string(),
    })
}

fn value_rect(label: &Rect, value_width: f32) -> Rect {
    let left = label.right + LABEL_VALUE_GAP;
    Rect::new(left, label.top, left + value_width, label.bottom)
}
