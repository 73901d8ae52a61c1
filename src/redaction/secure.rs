//! MuPDF document engine.
//!
//! Redactions are created as PDF `Redact` annotations and burned with
//! `pdf_redact_page`, which physically removes the text, images and
//! annotations underneath. Redacted content cannot be recovered from the
//! saved file.

use super::engine::{DocumentEngine, RedactableDocument, RedactablePage};
use crate::error::{RedactorError, RedactorResult};
use crate::geometry::Rect;
use std::path::Path;

use mupdf::pdf::{PdfAnnotationType, PdfDocument, PdfPage};
use mupdf::{Matrix, Page, Quad};

/// Default cap on search hits per query.
pub const DEFAULT_MAX_HITS: u32 = 100;

/// Lowest usable hit cap. A duplicated label must come back as two hits.
pub const MIN_MAX_HITS: u32 = 2;

/// Engine backed by MuPDF.
#[derive(Debug, Clone)]
pub struct MuPdfEngine {
    /// Maximum search hits per query (prevents performance issues)
    max_hits: u32,
}

impl MuPdfEngine {
    pub fn new() -> Self {
        Self {
            max_hits: DEFAULT_MAX_HITS,
        }
    }

    /// Sets the maximum number of search hits per query, at least
    /// [`MIN_MAX_HITS`].
    pub fn with_max_hits(mut self, max_hits: u32) -> Self {
        self.max_hits = max_hits.max(MIN_MAX_HITS);
        self
    }

    pub fn max_hits(&self) -> u32 {
        self.max_hits
    }
}

impl Default for MuPdfEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentEngine for MuPdfEngine {
    type Document = MuPdfDocument;

    fn open(&self, path: &Path) -> RedactorResult<MuPdfDocument> {
        if !path.is_file() {
            return Err(RedactorError::Open {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }

        let path_str = utf8_path(path, "input")?;
        let inner = PdfDocument::open(path_str).map_err(|e| RedactorError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(MuPdfDocument {
            inner,
            max_hits: self.max_hits,
        })
    }

    fn name(&self) -> &str {
        "MuPDF"
    }
}

/// A PDF opened through MuPDF.
pub struct MuPdfDocument {
    inner: PdfDocument,
    max_hits: u32,
}

impl RedactableDocument for MuPdfDocument {
    type Page = MuPdfPage;

    fn page_count(&self) -> RedactorResult<usize> {
        let count = self.inner.page_count().map_err(|e| RedactorError::Backend {
            message: format!("Failed to get page count: {}", e),
            page: None,
        })?;
        Ok(count.max(0) as usize)
    }

    fn load_page(&self, index: usize) -> RedactorResult<MuPdfPage> {
        let page = self
            .inner
            .load_page(index as i32)
            .map_err(|e| RedactorError::Backend {
                message: format!("Failed to load page: {}", e),
                page: Some(index),
            })?;

        // Convert to PDF page for annotation support
        let pdf_page = PdfPage::try_from(page.clone()).map_err(|e| RedactorError::Backend {
            message: format!("Page is not a PDF page: {}", e),
            page: Some(index),
        })?;

        Ok(MuPdfPage {
            index,
            page,
            pdf_page,
            pending: 0,
            max_hits: self.max_hits,
        })
    }

    fn save(&self, path: &Path) -> RedactorResult<()> {
        let path_str = utf8_path(path, "output")?;
        self.inner.save(path_str).map_err(|e| RedactorError::Save {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// A page of a [`MuPdfDocument`].
pub struct MuPdfPage {
    index: usize,
    page: Page,
    pdf_page: PdfPage,
    pending: usize,
    max_hits: u32,
}

impl RedactablePage for MuPdfPage {
    fn index(&self) -> usize {
        self.index
    }

    /// The full MediaBox in page space, including anything a smaller
    /// CropBox hides.
    fn mediabox(&self) -> RedactorResult<Rect> {
        let index = self.index;
        let media = self
            .pdf_page
            .media_box()
            .map_err(|e| backend_error(index, format!("Failed to read MediaBox: {}", e)))?;

        if media.is_empty() {
            // No usable MediaBox entry; MuPDF falls back to its default page size
            return self
                .page
                .bounds()
                .map(Rect::from)
                .map_err(|e| backend_error(index, format!("Failed to get page bounds: {}", e)));
        }

        let ctm = self
            .pdf_page
            .ctm()
            .map_err(|e| backend_error(index, format!("Failed to get page transform: {}", e)))?;

        Ok(transform_rect(&media, &ctm))
    }

    fn search_text(&self, needle: &str) -> RedactorResult<Vec<Rect>> {
        let index = self.index;
        let hits = self
            .page
            .search(needle, self.max_hits)
            .map_err(|e| backend_error(index, format!("Search failed for '{}': {}", needle, e)))?;

        Ok(hits.iter().map(quad_bounds).collect())
    }

    fn mark_pending_redaction(&mut self, rect: Rect) -> RedactorResult<()> {
        let index = self.index;
        let annot = self
            .pdf_page
            .create_annotation(PdfAnnotationType::Redact)
            .map_err(|e| {
                backend_error(index, format!("Failed to create redaction annotation: {}", e))
            })?;

        unsafe {
            ffi::set_annotation_rect(&annot, rect.into());
        }

        self.pending += 1;
        Ok(())
    }

    fn commit_redactions(&mut self) -> RedactorResult<usize> {
        if self.pending == 0 {
            return Ok(0);
        }

        let index = self.index;

        self.pdf_page
            .redact()
            .map_err(|e| backend_error(index, format!("Failed to apply redactions: {}", e)))?;

        Ok(std::mem::take(&mut self.pending))
    }
}

fn backend_error(page: usize, message: String) -> RedactorError {
    RedactorError::Backend {
        message,
        page: Some(page),
    }
}

/// Bounding rectangle of a search hit.
fn quad_bounds(quad: &Quad) -> Rect {
    let corners = [&quad.ul, &quad.ur, &quad.ll, &quad.lr].map(|p| (p.x, p.y));
    Rect::bounding(corners).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
}

/// Maps a rectangle in PDF user space through `ctm` into page space.
fn transform_rect(rect: &mupdf::Rect, ctm: &Matrix) -> Rect {
    let corners = [
        (rect.x0, rect.y0),
        (rect.x1, rect.y0),
        (rect.x0, rect.y1),
        (rect.x1, rect.y1),
    ]
    .map(|(x, y)| (x * ctm.a + y * ctm.c + ctm.e, x * ctm.b + y * ctm.d + ctm.f));
    Rect::bounding(corners).unwrap_or(Rect::from(*rect))
}

fn utf8_path<'a>(path: &'a Path, parameter: &str) -> RedactorResult<&'a str> {
    path.to_str().ok_or_else(|| RedactorError::InvalidInput {
        parameter: parameter.to_string(),
        reason: "Path contains invalid UTF-8".to_string(),
    })
}

/// Extracts the plain text of a PDF, for checking redacted output.
pub fn extract_text(input: &Path) -> RedactorResult<String> {
    let bytes = std::fs::read(input).map_err(|e| RedactorError::Io {
        path: input.to_path_buf(),
        source: e,
    })?;

    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| RedactorError::TextExtraction {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })
}

/// FFI helpers for MuPDF annotation operations.
mod ffi {
    use mupdf::pdf::PdfAnnotation;
    use mupdf::Rect;

    /// Sets the rectangle for a PDF annotation via FFI.
    ///
    /// # Safety
    /// The annotation must be valid and the MuPDF context initialized.
    pub unsafe fn set_annotation_rect(annot: &PdfAnnotation, rect: Rect) {
        #[repr(C)]
        struct PdfAnnotRaw {
            inner: *mut mupdf_sys::pdf_annot,
        }

        let annot_raw = std::mem::transmute::<&PdfAnnotation, &PdfAnnotRaw>(annot);
        let ctx = mupdf_sys::mupdf_new_base_context();

        if !ctx.is_null() {
            let fz_rect = mupdf_sys::fz_rect {
                x0: rect.x0,
                y0: rect.y0,
                x1: rect.x1,
                y1: rect.y1,
            };

            mupdf_sys::pdf_set_annot_rect(ctx, annot_raw.inner, fz_rect);
            mupdf_sys::mupdf_drop_base_context(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mupdf::Point;

    #[test]
    fn test_engine_configuration() {
        let engine = MuPdfEngine::new();
        assert_eq!(engine.name(), "MuPDF");
        assert_eq!(engine.max_hits(), DEFAULT_MAX_HITS);
        assert_eq!(engine.clone().with_max_hits(5).max_hits(), 5);
    }

    #[test]
    fn test_hit_cap_keeps_duplicates_detectable() {
        assert_eq!(MuPdfEngine::new().with_max_hits(0).max_hits(), MIN_MAX_HITS);
        assert_eq!(MuPdfEngine::new().with_max_hits(1).max_hits(), MIN_MAX_HITS);
    }

    #[test]
    fn test_transform_flips_pdf_space() {
        // Cropped A4: CropBox [0 400 595 842] gives a flip around y = 842
        let ctm = Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, 842.0);
        let media = mupdf::Rect::new(0.0, 0.0, 595.0, 842.0);
        assert_eq!(transform_rect(&media, &ctm), Rect::new(0.0, 0.0, 595.0, 842.0));

        let low = mupdf::Rect::new(50.0, 40.0, 150.0, 60.0);
        assert_eq!(transform_rect(&low, &ctm), Rect::new(50.0, 782.0, 150.0, 802.0));
    }

    #[test]
    fn test_quad_bounds() {
        let quad = Quad {
            ul: Point { x: 10.0, y: 20.0 },
            ur: Point { x: 50.0, y: 20.0 },
            ll: Point { x: 10.0, y: 31.0 },
            lr: Point { x: 50.0, y: 31.0 },
        };
        assert_eq!(quad_bounds(&quad), Rect::new(10.0, 20.0, 50.0, 31.0));
    }

    #[test]
    fn test_open_missing_file() {
        let err = MuPdfEngine::new()
            .open(Path::new("/nonexistent/payslip.pdf"))
            .err()
            .unwrap();
        assert!(matches!(err, RedactorError::Open { .. }));
    }
}
