//! Test fixtures and PDF builders.
//!
//! Provides a builder for creating multi-page test PDFs with text placed at
//! exact positions, following the Builder pattern for clean test setup.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// A line of text placed at a position measured from the bottom-left corner.
#[derive(Debug, Clone)]
struct TextLine {
    text: String,
    x: f32,
    y: f32,
    size: f32,
}

/// Builder for creating test PDFs with positioned text.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// TestPdfBuilder::new()
///     .text(20.0, 280.0, "BULLETIN DE SALAIRE")
///     .page()
///     .text(20.0, 200.0, "Conditions generales")
///     .build(Path::new("/tmp/test.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: Vec<Vec<TextLine>>,
    font_size: f32,
}

impl TestPdfBuilder {
    /// Creates a builder with one empty A4 page.
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            pages: vec![Vec::new()],
            font_size: 10.0,
        }
    }

    /// Sets the font size used by subsequent lines.
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Places `text` at (`x_mm`, `y_mm`) on the current page.
    pub fn text(mut self, x_mm: f32, y_mm: f32, text: &str) -> Self {
        let line = TextLine {
            text: text.to_string(),
            x: x_mm,
            y: y_mm,
            size: self.font_size,
        };
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
        self
    }

    /// Starts a new page.
    pub fn page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        for (i, lines) in self.pages.iter().enumerate() {
            let (page, layer) = if i == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(210.0), Mm(297.0), "Layer 1")
            };
            let current_layer = doc.get_page(page).get_layer(layer);
            for line in lines {
                current_layer.use_text(&line.text, line.size, Mm(line.x), Mm(line.y), &font);
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;

        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub const TEST_SSN: &str = "185057800608436";
pub const TEST_ADDRESS: &str = "12 RUE DES LILAS";
pub const TEST_NET_PAY: &str = "NET A PAYER 2150";

/// Appends a page laid out like the payslip template to `builder`.
///
/// The address line sits inside the template's fixed address block and the
/// SSN value follows `ssn_label` on the same line.
pub fn payslip_page(builder: TestPdfBuilder, ssn_label: &str) -> TestPdfBuilder {
    builder
        .text(20.0, 280.0, "BULLETIN DE SALAIRE")
        .text(110.0, 245.0, TEST_ADDRESS)
        .text(20.0, 200.0, &format!("{}  {}", ssn_label, TEST_SSN))
        .text(20.0, 150.0, TEST_NET_PAY)
}

/// Writes a single-page document that does not follow the payslip template.
pub fn create_letter(path: &Path, body: &str) -> Result<PathBuf> {
    TestPdfBuilder::new()
        .text(20.0, 270.0, "ATTESTATION EMPLOYEUR")
        .text(20.0, 250.0, body)
        .build(path)
}
