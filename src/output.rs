//! CLI output formatting.
//!
//! Each command has a `format_*` function returning display lines, and a
//! `print_*` wrapper that writes them to stdout. Format functions are pure,
//! so tests check exact lines without capturing stdout. Diagnostics go
//! through `tracing` to stderr; this module is only the user-facing report.
//!
//! # Output Format
//!
//! ## Page
//!
//! ```text
//! [ 33%] 001 a.jpg
//!     thumbnail: created
//!     link: created
//! [ 67%] 002 bad.jpg
//!     FAILED: External tool failed: 'convert' exited with exit status: 1: …
//! [100%] 003 c.png
//!     thumbnail: reused
//!     link: reused
//!
//! Page: gallery/index.html (2 images)
//! Thumbnails: 1 created, 1 reused
//! Links: 1 created, 1 reused
//! Ignored: 1 non-image input
//! Failed: 1 image
//!     bad.jpg: External tool failed: …
//! ```

use crate::compare::CompareOutput;
use crate::compress::CompressReport;
use crate::gallery::{GalleryEvent, GalleryOutput};
use crate::markdown::BodyCopy;
use crate::month::LinkMonthReport;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Completion percentage after `done` of `total` items, right-aligned.
fn format_percent(done: usize, total: usize) -> String {
    let pct = if total == 0 { 100 } else { done * 100 / total };
    format!("[{:>3}%]", pct)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `1 image`, `2 images`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

// ============================================================================
// Page
// ============================================================================

/// Format a single gallery progress event.
pub fn format_gallery_event(event: &GalleryEvent) -> Vec<String> {
    match event {
        GalleryEvent::ImageProcessed {
            index,
            total,
            source,
            thumbnail,
            link,
        } => vec![
            format!(
                "{} {} {}",
                format_percent(*index, *total),
                format_index(*index),
                file_name(source)
            ),
            format!("    thumbnail: {}", thumbnail),
            format!("    link: {}", link),
        ],
        GalleryEvent::ImageFailed {
            index,
            total,
            source,
            reason,
        } => vec![
            format!(
                "{} {} {}",
                format_percent(*index, *total),
                format_index(*index),
                file_name(source)
            ),
            format!("    FAILED: {}", reason),
        ],
    }
}

/// Format the end-of-run summary for the gallery builder.
pub fn format_gallery_summary(output: &GalleryOutput) -> Vec<String> {
    let stats = &output.stats;
    let mut lines = vec![String::new()];

    if let BodyCopy::Missing(path) = &output.body_copy {
        lines.push(format!("Copy: {} does not exist, left empty", path.display()));
    }
    lines.push(format!(
        "Page: {} ({})",
        output.index_path.display(),
        plural(output.records.len(), "image")
    ));
    lines.push(format!(
        "Thumbnails: {} created, {} reused",
        stats.thumbnails_created, stats.thumbnails_reused
    ));
    lines.push(format!(
        "Links: {} created, {} reused",
        stats.links_created, stats.links_reused
    ));
    if stats.ignored > 0 {
        lines.push(format!("Ignored: {}", plural(stats.ignored, "non-image input")));
    }
    if !output.failures.is_empty() {
        lines.push(format!("Failed: {}", plural(output.failures.len(), "image")));
        for failure in &output.failures {
            lines.push(format!(
                "    {}: {}",
                failure.source.display(),
                failure.reason
            ));
        }
    }
    lines
}

pub fn print_gallery_event(event: &GalleryEvent) {
    for line in format_gallery_event(event) {
        println!("{}", line);
    }
}

pub fn print_gallery_summary(output: &GalleryOutput) {
    for line in format_gallery_summary(output) {
        println!("{}", line);
    }
}

// ============================================================================
// Compress
// ============================================================================

pub fn format_compress_report(report: &CompressReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .processed
        .iter()
        .enumerate()
        .map(|(i, dest)| format!("{} {}", format_index(i + 1), dest.display()))
        .collect();
    lines.push(format!(
        "Compressed {}, {} failed",
        plural(report.processed.len(), "file"),
        report.failures.len()
    ));
    for failure in &report.failures {
        lines.push(format!("    {}: {}", failure.source.display(), failure.reason));
    }
    lines
}

pub fn print_compress_report(report: &CompressReport) {
    for line in format_compress_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Link month
// ============================================================================

pub fn format_link_month_report(report: &LinkMonthReport) -> Vec<String> {
    let mut lines = Vec::new();
    for dest in &report.linked {
        lines.push(format!("linked  {}", dest.display()));
    }
    for dest in &report.skipped {
        lines.push(format!("exists  {}", dest.display()));
    }
    lines.push(format!(
        "Linked {}, skipped {}",
        plural(report.linked.len(), "file"),
        report.skipped.len()
    ));
    lines
}

pub fn print_link_month_report(report: &LinkMonthReport) {
    for line in format_link_month_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Compare
// ============================================================================

pub fn format_compare_output(output: &CompareOutput) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, row) in output.rows.iter().enumerate() {
        let name = row
            .first()
            .map(|r| file_name(&r.source_path))
            .unwrap_or_default();
        let sizes: Vec<&str> = row.iter().map(|r| r.display_name.as_str()).collect();
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            name,
            sizes.join(" | ")
        ));
    }
    lines.push(format!(
        "Page: {} ({} across {})",
        output.index_path.display(),
        plural(output.rows.len(), "image"),
        plural(output.columns.len(), "column")
    ));
    lines
}

pub fn print_compare_output(output: &CompareOutput) {
    for line in format_compare_output(output) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
