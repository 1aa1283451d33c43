//! Shared types used across the gallery pipeline.

use std::fmt;
use std::path::PathBuf;

/// One processed image as it appears on a generated page.
///
/// `thumbnail_path` and `link_path` are relative to the output directory and
/// always use `/` separators, so the page keeps working when the whole output
/// directory is moved or served over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Optional label; empty for plain gallery cells.
    pub display_name: String,
    /// Absolute path to the original image.
    pub source_path: PathBuf,
    /// Thumbnail location relative to the output directory.
    pub thumbnail_path: String,
    /// Full-resolution alias relative to the output directory.
    pub link_path: String,
}

/// Whether an on-disk artifact (thumbnail or link) was produced by this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    Created,
    Reused,
    /// A dangling symlink was replaced.
    Repaired,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactStatus::Created => "created",
            ArtifactStatus::Reused => "reused",
            ArtifactStatus::Repaired => "repaired",
        };
        f.write_str(label)
    }
}
