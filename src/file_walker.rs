//! Recursive discovery of input data files.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Extension of both song and log data files.
pub const JSON_EXTENSION: &str = "json";

/// Find every file under `root` whose extension is `extension` (without the
/// leading dot, matched case-sensitively).
///
/// Paths are absolute and sorted lexicographically so runs over the same
/// tree process files in the same order. A root that does not exist yields
/// no files.
pub fn discover<P: AsRef<Path>>(root: P, extension: &str) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.exists() {
        warn!("Data directory {} does not exist", root.display());
        return Ok(Vec::new());
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("Error resolving path: {}", root.display()))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
