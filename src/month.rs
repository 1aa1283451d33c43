//! Link one month's photos into another folder.
//!
//! Photos are expected to carry their date in the file name, with the month
//! as the second `-`-separated field:
//!
//! ```text
//! 2016-07-01_21.32.38.jpg   → month "07"
//! 2016-08-14_09.00.12.jpg   → month "08"
//! ```
//!
//! Matching entries are symlinked (never copied) into the destination.

use crate::link::ensure_symlink;
use crate::listing::{file_name_lossy, list_entries};
use crate::types::ArtifactStatus;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkMonthError {
    #[error("Month must be a non-empty value without '-', got '{0}'")]
    InvalidMonth(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory listing failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Outcome of a month link run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMonthReport {
    /// Links created (or repaired) by this run.
    pub linked: Vec<PathBuf>,
    /// Destinations that already existed.
    pub skipped: Vec<PathBuf>,
}

/// The month field of a date-stamped file name, if it has one.
pub fn month_of(name: &str) -> Option<&str> {
    name.split('-').nth(1)
}

/// Symlink every entry of `source_dir` taken in `month` into `dest_dir`.
pub fn link_month(
    month: &str,
    source_dir: &Path,
    dest_dir: &Path,
) -> Result<LinkMonthReport, LinkMonthError> {
    if month.is_empty() || month.contains('-') {
        return Err(LinkMonthError::InvalidMonth(month.to_string()));
    }

    let source_dir = std::path::absolute(source_dir)?;
    let dest_dir = std::path::absolute(dest_dir)?;

    let matching: Vec<PathBuf> = list_entries(&source_dir)?
        .into_iter()
        .filter(|p| month_of(&file_name_lossy(p)) == Some(month))
        .collect();

    fs::create_dir_all(&dest_dir)?;

    let mut report = LinkMonthReport::default();
    for source in matching {
        let dest = dest_dir.join(file_name_lossy(&source));
        match ensure_symlink(&source, &dest)? {
            ArtifactStatus::Reused => report.skipped.push(dest),
            ArtifactStatus::Created | ArtifactStatus::Repaired => report.linked.push(dest),
        }
    }

    tracing::info!(
        month,
        linked = report.linked.len(),
        skipped = report.skipped.len(),
        "month linked"
    );
    Ok(report)
}
