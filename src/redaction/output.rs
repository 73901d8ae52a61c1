//! Output path derivation and atomic save.

use crate::error::{RedactorError, RedactorResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default suffix appended to the input's file stem.
pub const DEFAULT_SUFFIX: &str = "_redacted";

/// Derives the output path for `input`.
///
/// The name is the input's stem, then `suffix`, then the original
/// extension. The file goes in `output_dir` when given, otherwise beside
/// the input.
pub fn output_path(input: &Path, output_dir: Option<&Path>, suffix: &str) -> RedactorResult<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| RedactorError::InvalidInput {
            parameter: "input".to_string(),
            reason: format!("'{}' has no file name", input.display()),
        })?;

    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok(dir.join(name))
}

/// Returns true when `output` would overwrite `input`.
pub fn is_same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    }
}

/// Writes a document through `save` into a temporary file next to `dest`,
/// then renames it into place.
///
/// Nothing appears under `dest` unless `save` succeeds. Missing parent
/// directories are created.
pub fn save_atomically<F>(dest: &Path, save: F) -> RedactorResult<()>
where
    F: FnOnce(&Path) -> RedactorResult<()>,
{
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&dir).map_err(|e| RedactorError::Io {
        path: dir.clone(),
        source: e,
    })?;

    let temp = tempfile::Builder::new()
        .prefix(".payslip-redactor-")
        .suffix(".pdf.tmp")
        .tempfile_in(&dir)
        .map_err(|e| RedactorError::Io {
            path: dir.clone(),
            source: e,
        })?;

    save(temp.path())?;

    temp.persist(dest).map_err(|e| RedactorError::Save {
        path: dest.to_path_buf(),
        reason: e.error.to_string(),
    })?;

    Ok(())
}
