//! In-memory document engine.
//!
//! Pages answer searches from a fixed table of hits and record every
//! commit, so tests can assert exactly which regions were burned.

use payslip_redactor::redaction::{DocumentEngine, RedactableDocument, RedactablePage};
use payslip_redactor::{Rect, RedactorError, RedactorResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const A4: Rect = Rect::new(0.0, 0.0, 595.0, 842.0);
pub const HEADER: &str = "BULLETIN DE SALAIRE";
pub const SSN_LABEL: &str = "N° SS :";

/// Regions burned by one commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub document: PathBuf,
    pub page: usize,
    pub regions: Vec<Rect>,
}

/// Text layout of a fake page.
#[derive(Debug, Clone, Default)]
pub struct FakePageSpec {
    hits: HashMap<String, Vec<Rect>>,
}

impl FakePageSpec {
    /// A page with no searchable text.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A payslip page with the given SSN label occurrences.
    pub fn payslip(ssn_labels: &[Rect]) -> Self {
        Self::blank()
            .with_text(HEADER, &[Rect::new(200.0, 30.0, 395.0, 46.0)])
            .with_text(SSN_LABEL, ssn_labels)
    }

    pub fn with_text(mut self, needle: &str, rects: &[Rect]) -> Self {
        self.hits.insert(needle.to_string(), rects.to_vec());
        self
    }
}

/// Engine serving documents from memory. Saving writes a small text file.
#[derive(Debug, Default)]
pub struct FakeEngine {
    documents: HashMap<PathBuf, Vec<FakePageSpec>>,
    commits: Rc<RefCell<Vec<Commit>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>, pages: Vec<FakePageSpec>) -> Self {
        self.documents.insert(path.into(), pages);
        self
    }

    /// Every commit so far, in order.
    pub fn commits(&self) -> Vec<Commit> {
        self.commits.borrow().clone()
    }

    /// Regions burned on `page` of `document`.
    pub fn burned(&self, document: &Path, page: usize) -> Vec<Rect> {
        self.commits
            .borrow()
            .iter()
            .filter(|c| c.document == document && c.page == page)
            .flat_map(|c| c.regions.iter().copied())
            .collect()
    }
}

impl DocumentEngine for FakeEngine {
    type Document = FakeDocument;

    fn open(&self, path: &Path) -> RedactorResult<FakeDocument> {
        let pages = self
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| RedactorError::Open {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            })?;

        Ok(FakeDocument {
            path: path.to_path_buf(),
            pages,
            commits: Rc::clone(&self.commits),
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub struct FakeDocument {
    path: PathBuf,
    pages: Vec<FakePageSpec>,
    commits: Rc<RefCell<Vec<Commit>>>,
}

impl RedactableDocument for FakeDocument {
    type Page = FakePage;

    fn page_count(&self) -> RedactorResult<usize> {
        Ok(self.pages.len())
    }

    fn load_page(&self, index: usize) -> RedactorResult<FakePage> {
        let spec = self.pages.get(index).cloned().ok_or(RedactorError::Backend {
            message: "page out of range".to_string(),
            page: Some(index),
        })?;

        Ok(FakePage {
            document: self.path.clone(),
            index,
            spec,
            pending: Vec::new(),
            commits: Rc::clone(&self.commits),
        })
    }

    fn save(&self, path: &Path) -> RedactorResult<()> {
        let body = format!("redacted copy of {}\n", self.path.display());
        fs::write(path, body).map_err(|e| RedactorError::Save {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

pub struct FakePage {
    document: PathBuf,
    index: usize,
    spec: FakePageSpec,
    pending: Vec<Rect>,
    commits: Rc<RefCell<Vec<Commit>>>,
}

impl RedactablePage for FakePage {
    fn index(&self) -> usize {
        self.index
    }

    fn mediabox(&self) -> RedactorResult<Rect> {
        Ok(A4)
    }

    fn search_text(&self, needle: &str) -> RedactorResult<Vec<Rect>> {
        Ok(self.spec.hits.get(needle).cloned().unwrap_or_default())
    }

    fn mark_pending_redaction(&mut self, rect: Rect) -> RedactorResult<()> {
        self.pending.push(rect);
        Ok(())
    }

    fn commit_redactions(&mut self) -> RedactorResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let regions = std::mem::take(&mut self.pending);
        let count = regions.len();
        self.commits.borrow_mut().push(Commit {
            document: self.document.clone(),
            page: self.index,
            regions,
        });
        Ok(count)
    }
}
