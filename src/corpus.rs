use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Expand a corpus argument into concrete files
///
/// A plain path resolves to itself when it is a file. Anything containing glob
/// metacharacters (`*`, `?`, `[`) is expanded and the matches are sorted so the
/// training order is reproducible. Zero matches is an error: training on an
/// empty corpus would silently produce a prior-only model.
pub fn resolve_corpus_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    if !is_glob_pattern(pattern) {
        let path = PathBuf::from(pattern);
        if !path.is_file() {
            anyhow::bail!("Corpus file does not exist: {}", path.display());
        }
        return Ok(vec![path]);
    }

    debug!("Expanding corpus pattern: {}", pattern);
    let paths = glob(pattern).with_context(|| format!("Invalid corpus pattern: {pattern}"))?;

    let mut files = Vec::new();
    for entry in paths {
        // WHY: an unreadable match is a corpus I/O failure, not something to skip
        let path = entry.with_context(|| format!("Failed to expand corpus pattern {pattern}"))?;
        if path.is_file() {
            files.push(path);
        } else {
            warn!("Skipping non-file corpus match: {}", path.display());
        }
    }

    if files.is_empty() {
        anyhow::bail!("Corpus pattern matched no files: {pattern}");
    }

    files.sort();
    info!("Corpus pattern {} resolved to {} files", pattern, files.len());
    Ok(files)
}

/// Resolve several corpus arguments, keeping argument order and dropping duplicates
pub fn resolve_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        for path in resolve_corpus_paths(pattern.as_ref())? {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
