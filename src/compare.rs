//! Side-by-side comparison pages.
//!
//! Shows the same photos across several directories, typically an original
//! and a few compressed variants, one row per photo and one column per
//! directory. Each cell is labelled with the file's size so quality and
//! weight can be judged together.
//!
//! ```text
//! comparisons/
//! ├── index.html
//! ├── month_07/2016-07-01_21.32.38.jpg             -> /photos/month_07/...
//! └── month_07_compressed_60/2016-07-01_21.32.38.jpg -> /photos/month_07_compressed_60/...
//! ```
//!
//! Each column directory is mirrored under the output directory by name and
//! the photos are symlinked into it, so the page only uses relative paths.

use crate::config::StyleConfig;
use crate::link::ensure_symlink;
use crate::listing::file_name_lossy;
use crate::markdown::{MarkdownError, MarkdownRenderer, load_body_copy};
use crate::render::{render_compare_page, write_index};
use crate::types::ImageRecord;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("At least one column directory is required")]
    NoColumns,
    #[error("At least one image name is required")]
    NoImages,
    #[error("Two columns share the directory name '{0}'")]
    DuplicateColumn(String),
    #[error("Image name '{0}' must be a plain file name")]
    InvalidImageName(String),
    #[error("{image} is missing from {column}")]
    MissingImage { image: String, column: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Body copy: {0}")]
    Markdown(#[from] MarkdownError),
}

/// Human-readable byte count in binary units, one decimal place.
///
/// `sizeof_fmt(1536) == "1.5 KiB"`
pub fn sizeof_fmt(bytes: u64) -> String {
    const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];
    let mut num = bytes as f64;
    for unit in UNITS {
        if num.abs() < 1024.0 {
            return format!("{num:.1} {unit}B");
        }
        num /= 1024.0;
    }
    format!("{num:.1} YiB")
}

/// The generated comparison page.
#[derive(Debug, Clone)]
pub struct CompareOutput {
    pub html: String,
    pub index_path: PathBuf,
    /// Column labels, in order.
    pub columns: Vec<String>,
    /// One row per image, one record per column.
    pub rows: Vec<Vec<ImageRecord>>,
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Build a comparison page for `images` (file names) across `columns`
/// (directories) inside `output_dir`.
pub fn create_compare_page(
    images: &[String],
    columns: &[PathBuf],
    output_dir: &Path,
    body_markdown: Option<&Path>,
    style: &StyleConfig,
    renderer: &dyn MarkdownRenderer,
) -> Result<CompareOutput, CompareError> {
    if columns.is_empty() {
        return Err(CompareError::NoColumns);
    }
    if images.is_empty() {
        return Err(CompareError::NoImages);
    }
    if let Some(bad) = images.iter().find(|name| !is_plain_file_name(name)) {
        return Err(CompareError::InvalidImageName(bad.clone()));
    }

    let mut labels = Vec::with_capacity(columns.len());
    let mut seen = HashSet::new();
    for column in columns {
        let label = file_name_lossy(&std::path::absolute(column)?);
        if !seen.insert(label.clone()) {
            return Err(CompareError::DuplicateColumn(label));
        }
        labels.push(label);
    }

    // Check everything is present before touching the output directory
    for image in images {
        for column in columns {
            if !column.join(image).is_file() {
                return Err(CompareError::MissingImage {
                    image: image.clone(),
                    column: column.clone(),
                });
            }
        }
    }

    let body_copy = load_body_copy(body_markdown, renderer)?;

    let mut rows = Vec::with_capacity(images.len());
    for image in images {
        let mut row = Vec::with_capacity(columns.len());
        for (column, label) in columns.iter().zip(&labels) {
            let source = std::path::absolute(column.join(image))?;
            let mirror = output_dir.join(label);
            fs::create_dir_all(&mirror)?;
            ensure_symlink(&source, &mirror.join(image))?;

            let size = fs::metadata(&source)?.len();
            let rel = format!("{label}/{image}");
            row.push(ImageRecord {
                display_name: sizeof_fmt(size),
                source_path: source,
                thumbnail_path: rel.clone(),
                link_path: rel,
            });
        }
        rows.push(row);
    }

    let html = render_compare_page(&labels, &rows, body_copy.html(), style).into_string();
    let index_path = write_index(output_dir, &html)?;
    tracing::info!(
        path = %index_path.display(),
        images = images.len(),
        columns = labels.len(),
        "comparison page written"
    );

    Ok(CompareOutput {
        html,
        index_path,
        columns: labels,
        rows,
    })
}
