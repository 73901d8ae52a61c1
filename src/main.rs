//! Payslip redaction CLI.
//!
//! Redacts the social-security number and home address from each payslip
//! given on the command line and writes a sanitized copy per document.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use payslip_redactor::redaction::DEFAULT_SUFFIX;
use payslip_redactor::{
    extract_text, resolve_inputs, BatchRedactor, DocumentOutcome, FieldFailurePolicy,
    RedactorConfig, TracingSink,
};

/// Payslip Redaction Tool
///
/// Securely redact social-security numbers and home addresses from payslip PDFs.
/// Pages that do not look like a payslip are redacted entirely.
#[derive(Parser)]
#[command(name = "payslip-redactor")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input PDF files or glob patterns (e.g. "payslips/*.pdf")
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Directory for redacted files (defaults to alongside each input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Suffix appended to each output file name
    #[arg(short, long, value_name = "SUFFIX", default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// What to do when a payslip page is missing its SS number label or has several
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = OnFieldError::Abort)]
    on_field_error: OnFieldError,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF (for verifying redacted output)
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnFieldError {
    /// Skip the whole document; nothing is written for it
    Abort,
    /// Redact the offending page entirely and keep going
    FullPage,
}

impl From<OnFieldError> for FieldFailurePolicy {
    fn from(value: OnFieldError) -> Self {
        match value {
            OnFieldError::Abort => FieldFailurePolicy::AbortDocument,
            OnFieldError::FullPage => FieldFailurePolicy::RedactFullPage,
        }
    }
}

/// Exit code for usage errors (no inputs).
const EXIT_USAGE: u8 = 2;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the batch configuration from command-line flags.
fn build_config(cli: &Cli) -> RedactorConfig {
    let mut config = RedactorConfig::new()
        .with_suffix(cli.suffix.clone())
        .with_field_failure_policy(cli.on_field_error.into());
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir.clone());
    }
    config
}

fn redact(cli: &Cli) -> Result<ExitCode> {
    if cli.inputs.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    let mut sink = TracingSink;
    let inputs = resolve_inputs(&cli.inputs, &mut sink).context("Failed to resolve inputs")?;
    if inputs.is_empty() {
        eprintln!("No input files matched: {}", cli.inputs.join(", "));
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    let redactor = BatchRedactor::with_mupdf(build_config(cli));
    let report = redactor.run(&inputs, &mut sink);

    for outcome in &report.documents {
        match outcome {
            DocumentOutcome::Redacted(summary) => {
                println!(
                    "✓ {} → {} ({} page(s), {} fully redacted)",
                    summary.input.display(),
                    summary.output.display(),
                    summary.pages_processed,
                    summary.pages_fully_redacted
                );
            }
            DocumentOutcome::Failed { input, error } => {
                println!("✗ {}: {}", input.display(), error);
            }
        }
    }

    if cli.verbose {
        println!("\nRedaction Summary:");
        println!("  Documents processed: {}", report.documents.len());
        println!("  Documents redacted:  {}", report.succeeded());
        println!("  Documents failed:    {}", report.failures().count());
    }

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Extracts text from a PDF.
fn extract(input: &Path, output: Option<&Path>) -> Result<()> {
    let text = extract_text(input).with_context(|| "Text extraction failed")?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &text)
            .with_context(|| format!("Failed to write to {}", output_path.display()))?;
        println!(
            "✓ Extracted {} characters → {}",
            text.len(),
            output_path.display()
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Extract { input, output }) => {
            extract(input, output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        None => redact(&cli),
    }
}
