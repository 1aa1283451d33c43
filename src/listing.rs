//! Flat directory listings shared by the batch tools.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Entries directly inside `dir` (no recursion), sorted by file name.
///
/// Directories are left out; files and symlinks are returned.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            entries.push(entry.into_path());
        }
    }
    Ok(entries)
}

/// The file name of `path` as UTF-8 (lossy), or an empty string.
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
