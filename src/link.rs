//! Full-resolution aliases.
//!
//! The gallery never copies image bytes. Each original is exposed inside the
//! output directory through a symbolic link named after the original's file
//! name, pointing at the original's absolute path.
//!
//! Re-running is safe: an existing entry at the destination is reused as-is,
//! except a dangling symlink (its target moved or was deleted), which is
//! replaced so a re-run never leaves a broken link behind.

use crate::types::ArtifactStatus;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{0} has no file name")]
    MissingFileName(PathBuf),
}

/// A published alias and whether this run created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// Publish `source` into `output_dir` as `output_dir/<basename(source)>`.
pub fn publish_link(source: &Path, output_dir: &Path) -> Result<LinkOutcome, LinkError> {
    let name = source
        .file_name()
        .ok_or_else(|| LinkError::MissingFileName(source.to_path_buf()))?;
    let target = std::path::absolute(source)?;
    let dest = output_dir.join(name);

    let status = ensure_symlink(&target, &dest)?;
    Ok(LinkOutcome { path: dest, status })
}

/// Create a symlink at `dest` pointing to `target` unless something is
/// already there.
pub fn ensure_symlink(target: &Path, dest: &Path) -> io::Result<ArtifactStatus> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.file_type().is_symlink() && !dest.exists() => {
            tracing::warn!(path = %dest.display(), "replacing dangling symlink");
            fs::remove_file(dest)?;
            symlink(target, dest)?;
            Ok(ArtifactStatus::Repaired)
        }
        Ok(_) => {
            tracing::info!(path = %dest.display(), "symlink already exists, skipping");
            Ok(ArtifactStatus::Reused)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            symlink(target, dest)?;
            Ok(ArtifactStatus::Created)
        }
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(windows)]
fn symlink(target: &Path, dest: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, dest)
}
