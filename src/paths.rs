//! Path utilities for gemspec detection.

use std::fs;
use std::path::{Path, PathBuf};

/// Make `path` absolute against the process working directory.
/// Falls back to the path as given if the working directory is unavailable.
#[must_use]
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Find the gemspec in `dir`.
/// Only looks at the top level; when several exist the first by name wins.
#[must_use]
pub fn find_gemspec_in(dir: impl AsRef<Path>) -> Option<PathBuf> {
    let entries = fs::read_dir(dir.as_ref()).ok()?;

    let mut gemspecs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("gemspec")
        })
        .collect();

    gemspecs.sort();
    gemspecs.into_iter().next()
}
