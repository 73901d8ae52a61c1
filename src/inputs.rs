//! Expansion of input specifications into document paths.

use crate::error::{RedactorError, RedactorResult};
use crate::redaction::{EventSink, RedactionEvent};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Returns true when `spec` contains glob metacharacters.
pub fn is_glob_pattern(spec: &str) -> bool {
    spec.contains(['*', '?', '['])
}

/// Resolves literal paths and glob patterns into a de-duplicated list of
/// documents, keeping first-seen order.
///
/// Literal paths are passed through unchecked so a missing file is reported
/// when it is opened. An existing file is always literal, even when its name
/// contains glob characters. Glob matches are sorted; a pattern matching
/// nothing is reported to `sink` and skipped, as is any path under it that
/// cannot be read.
pub fn resolve_inputs<S, I>(specs: I, sink: &mut S) -> RedactorResult<Vec<PathBuf>>
where
    S: EventSink + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for spec in specs {
        let spec = spec.as_ref();

        let paths = if is_glob_pattern(spec) && !Path::new(spec).is_file() {
            let matches = expand_glob(spec, sink)?;
            if matches.is_empty() {
                sink.report(&RedactionEvent::NoMatches { pattern: spec });
            }
            matches
        } else {
            vec![PathBuf::from(spec)]
        };

        for path in paths {
            if seen.insert(path.clone()) {
                resolved.push(path);
            }
        }
    }

    Ok(resolved)
}

fn expand_glob<S: EventSink + ?Sized>(pattern: &str, sink: &mut S) -> RedactorResult<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| RedactorError::InvalidInput {
        parameter: "input".to_string(),
        reason: format!("invalid glob pattern '{}': {}", pattern, e),
    })?;

    let entries = entries.map(|entry| entry.map_err(|e| (e.path().to_path_buf(), e.into_error())));
    Ok(collect_matches(pattern, entries, sink))
}

/// Keeps the regular files among `entries`, sorted. Unreadable entries are
/// reported and skipped.
fn collect_matches<S, I>(pattern: &str, entries: I, sink: &mut S) -> Vec<PathBuf>
where
    S: EventSink + ?Sized,
    I: IntoIterator<Item = Result<PathBuf, (PathBuf, io::Error)>>,
{
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err((path, error)) => sink.report(&RedactionEvent::UnreadableMatch {
                pattern,
                path: &path,
                error: &error,
            }),
        }
    }

    // Sort for determinism
    files.sort();
    files
}
