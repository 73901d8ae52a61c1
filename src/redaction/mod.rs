//! Redaction planning and batch execution.
//!
//! [`BatchRedactor`] drives a pass over a set of documents: every page is
//! planned by [`RedactionPlanner`], its regions are burned through the
//! [`engine`] seam, and the result is saved under a derived name.

pub mod engine;
pub mod events;
pub mod output;
pub mod planner;
pub mod secure;

pub use engine::{DocumentEngine, RedactableDocument, RedactablePage};
pub use events::{EventSink, RecordedEvent, RecordingSink, RedactionEvent, TracingSink};
pub use output::{output_path, DEFAULT_SUFFIX};
pub use planner::{FieldFailurePolicy, RedactionPlan, RedactionPlanner};
pub use secure::{extract_text, MuPdfEngine};

use crate::error::{RedactorError, RedactorResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Settings for a batch run.
#[derive(Debug, Clone)]
pub struct RedactorConfig {
    /// Directory for outputs; `None` writes each output beside its input.
    pub output_dir: Option<PathBuf>,

    /// Appended to each input's file stem.
    pub suffix: String,

    /// Handling of payslip pages whose fields cannot be located.
    pub on_field_error: FieldFailurePolicy,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            on_field_error: FieldFailurePolicy::default(),
        }
    }
}

impl RedactorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_field_failure_policy(mut self, policy: FieldFailurePolicy) -> Self {
        self.on_field_error = policy;
        self
    }
}

/// Statistics for one redacted document.
#[derive(Debug, Clone, Default)]
pub struct DocumentSummary {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Pages processed
    pub pages_processed: usize,

    /// Pages redacted in full (unexpected layout or field fallback)
    pub pages_fully_redacted: usize,

    /// Regions burned across all pages
    pub regions_redacted: usize,
}

/// Result of processing one input.
#[derive(Debug)]
pub enum DocumentOutcome {
    Redacted(DocumentSummary),
    Failed { input: PathBuf, error: RedactorError },
}

impl DocumentOutcome {
    pub fn input(&self) -> &Path {
        match self {
            Self::Redacted(summary) => &summary.input,
            Self::Failed { input, .. } => input,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of a whole batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.documents.iter().any(DocumentOutcome::is_failure)
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| d.is_failure())
    }

    pub fn succeeded(&self) -> usize {
        self.documents.len() - self.failures().count()
    }
}

/// Redacts payslips one document at a time.
pub struct BatchRedactor<E: DocumentEngine> {
    engine: E,
    planner: RedactionPlanner,
    config: RedactorConfig,
}

impl BatchRedactor<MuPdfEngine> {
    /// Creates a redactor backed by MuPDF.
    pub fn with_mupdf(config: RedactorConfig) -> Self {
        Self::new(MuPdfEngine::new(), config)
    }
}

impl<E: DocumentEngine> BatchRedactor<E> {
    pub fn new(engine: E, config: RedactorConfig) -> Self {
        Self {
            engine,
            planner: RedactionPlanner::default(),
            config,
        }
    }

    pub fn with_planner(mut self, planner: RedactionPlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &RedactorConfig {
        &self.config
    }

    /// Redacts every input in order.
    ///
    /// A failing document is recorded in the report and reported to `sink`;
    /// the batch moves on to the next input. An input whose output was
    /// already written earlier in the batch fails instead of replacing it.
    pub fn run<S: EventSink + ?Sized>(&self, inputs: &[PathBuf], sink: &mut S) -> BatchReport {
        let mut report = BatchReport::default();
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

        for input in inputs {
            let result = self.destination(input).and_then(|output| {
                match written.get(&output) {
                    Some(earlier) => Err(output_collision(&output, earlier)),
                    None => self.redact_to(input, output, sink),
                }
            });

            let outcome = match result {
                Ok(summary) => {
                    sink.report(&RedactionEvent::DocumentSaved {
                        input,
                        output: &summary.output,
                    });
                    written.insert(summary.output.clone(), input.clone());
                    DocumentOutcome::Redacted(summary)
                }
                Err(error) => {
                    sink.report(&RedactionEvent::DocumentFailed {
                        input,
                        error: &error,
                    });
                    DocumentOutcome::Failed {
                        input: input.clone(),
                        error,
                    }
                }
            };
            report.documents.push(outcome);
        }

        report
    }

    /// Redacts a single document and saves it under its derived output path.
    ///
    /// Nothing is written when any page fails.
    pub fn redact_document<S: EventSink + ?Sized>(
        &self,
        input: &Path,
        sink: &mut S,
    ) -> RedactorResult<DocumentSummary> {
        let output = self.destination(input)?;
        self.redact_to(input, output, sink)
    }

    /// Derives the output path for `input`, refusing one that is the input.
    fn destination(&self, input: &Path) -> RedactorResult<PathBuf> {
        let output = output_path(input, self.config.output_dir.as_deref(), &self.config.suffix)?;
        if output::is_same_file(input, &output) {
            return Err(RedactorError::InvalidInput {
                parameter: "suffix".to_string(),
                reason: format!(
                    "output '{}' would overwrite the input; set a suffix or an output directory",
                    output.display()
                ),
            });
        }
        Ok(output)
    }

    fn redact_to<S: EventSink + ?Sized>(
        &self,
        input: &Path,
        output: PathBuf,
        sink: &mut S,
    ) -> RedactorResult<DocumentSummary> {
        tracing::debug!(engine = self.engine.name(), input = %input.display(), "opening document");
        let document = self.engine.open(input)?;
        let page_count = document.page_count()?;

        let mut summary = DocumentSummary {
            input: input.to_path_buf(),
            output,
            pages_processed: page_count,
            ..Default::default()
        };

        for index in 0..page_count {
            let mut page = document.load_page(index)?;
            let plan = self.plan_page(input, &page, sink)?;

            for rect in plan.regions() {
                page.mark_pending_redaction(*rect)?;
            }
            summary.regions_redacted += page.commit_redactions()?;

            if plan.is_full_page() {
                summary.pages_fully_redacted += 1;
            }
        }

        output::save_atomically(&summary.output, |tmp| document.save(tmp))?;

        Ok(summary)
    }

    fn plan_page<P, S>(&self, input: &Path, page: &P, sink: &mut S) -> RedactorResult<RedactionPlan>
    where
        P: RedactablePage,
        S: EventSink + ?Sized,
    {
        let plan = match self.planner.plan(page) {
            Ok(plan) => plan,
            Err(error)
                if error.is_field_failure()
                    && self.config.on_field_error == FieldFailurePolicy::RedactFullPage =>
            {
                sink.report(&RedactionEvent::FieldFallback {
                    path: input,
                    page: page.index(),
                    error: &error,
                });
                return Ok(RedactionPlan::FullPage(page.mediabox()?));
            }
            Err(error) => return Err(error),
        };

        match &plan {
            RedactionPlan::FullPage(_) => sink.report(&RedactionEvent::PageFullyRedacted {
                path: input,
                page: page.index(),
                reason: "header not found",
            }),
            RedactionPlan::Fields(rects) => tracing::debug!(
                file = %input.display(),
                page = page.index() + 1,
                regions = rects.len(),
                "payslip page, redacting fields"
            ),
        }

        Ok(plan)
    }
}

fn output_collision(output: &Path, earlier: &Path) -> RedactorError {
    RedactorError::InvalidInput {
        parameter: "output".to_string(),
        reason: format!(
            "'{}' was already written for '{}' in this batch",
            output.display(),
            earlier.display()
        ),
    }
}
