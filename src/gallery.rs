//! The gallery builder.
//!
//! Turns a list of image paths into a populated output directory:
//!
//! ```text
//! gallery/
//! ├── index.html             # the page
//! ├── thumbnails/
//! │   ├── a.jpg              # square crops
//! │   └── c.png
//! ├── a.jpg -> /photos/a.jpg # full-resolution aliases
//! └── c.png -> /photos/c.png
//! ```
//!
//! Images are processed one at a time in input order, and the page lists
//! them in that same order. A thumbnail that cannot be produced is reported
//! for that image and the image is left out of the grid; the rest of the run
//! continues. Filesystem failures (output directory not writable, symlink
//! creation failing) abort the run.

use crate::config::{ConfigError, GalleryConfig};
use crate::imaging::{ImageBackend, create_thumbnail};
use crate::link::{LinkError, publish_link};
use crate::markdown::{BodyCopy, MarkdownError, MarkdownRenderer, load_body_copy};
use crate::render::{render_gallery_page, write_index};
use crate::select::{ACCEPTED_EXTENSIONS, select_images};
use crate::types::{ArtifactStatus, ImageRecord};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Body copy: {0}")]
    Markdown(#[from] MarkdownError),
    #[error("Linking failed: {0}")]
    Link(#[from] LinkError),
}

/// Progress events emitted while images are processed.
#[derive(Debug, Clone)]
pub enum GalleryEvent {
    ImageProcessed {
        /// 1-based position among the selected images.
        index: usize,
        total: usize,
        source: PathBuf,
        thumbnail: ArtifactStatus,
        link: ArtifactStatus,
    },
    ImageFailed {
        index: usize,
        total: usize,
        source: PathBuf,
        reason: String,
    },
}

/// An image that was selected but could not be added to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub source: PathBuf,
    pub reason: String,
}

/// Counters for the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryStats {
    /// Inputs dropped by the extension filter.
    pub ignored: usize,
    pub thumbnails_created: usize,
    pub thumbnails_reused: usize,
    pub links_created: usize,
    pub links_reused: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct GalleryOutput {
    /// The page as written to `index.html`.
    pub html: String,
    pub index_path: PathBuf,
    /// One record per image on the page, in input order.
    pub records: Vec<ImageRecord>,
    pub failures: Vec<ImageFailure>,
    pub body_copy: BodyCopy,
    pub stats: GalleryStats,
}

/// Build the gallery page for `images` inside `output_dir`.
///
/// Inputs without an accepted extension are ignored. The body copy is
/// resolved before any image work so a broken Markdown renderer fails fast.
pub fn create_page(
    images: &[PathBuf],
    output_dir: &Path,
    body_markdown: Option<&Path>,
    config: &GalleryConfig,
    backend: &impl ImageBackend,
    renderer: &dyn MarkdownRenderer,
    events: Option<Sender<GalleryEvent>>,
) -> Result<GalleryOutput, GalleryError> {
    config.validate()?;
    let body_copy = load_body_copy(body_markdown, renderer)?;

    let selected = select_images(images, ACCEPTED_EXTENSIONS);
    let mut stats = GalleryStats {
        ignored: images.len() - selected.len(),
        ..GalleryStats::default()
    };

    let thumb_dir = output_dir.join(&config.thumbnail_dir);
    fs::create_dir_all(&thumb_dir)?;

    let thumb_config = config.thumbnail_config();
    let total = selected.len();
    let mut records = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (idx, image) in selected.iter().enumerate() {
        let index = idx + 1;
        let fail = |reason: String| {
            tracing::error!(path = %image.display(), %reason, "skipping image");
            if let Some(tx) = &events {
                tx.send(GalleryEvent::ImageFailed {
                    index,
                    total,
                    source: image.clone(),
                    reason: reason.clone(),
                })
                .ok();
            }
            ImageFailure {
                source: image.clone(),
                reason,
            }
        };

        if !image.is_file() {
            failures.push(fail("source image not found".to_string()));
            continue;
        }
        let source_path = std::path::absolute(image)?;

        let thumbnail = match create_thumbnail(backend, &source_path, &thumb_dir, &thumb_config) {
            Ok(outcome) => outcome,
            Err(e) => {
                failures.push(fail(e.to_string()));
                continue;
            }
        };
        let link = publish_link(&source_path, output_dir)?;

        match thumbnail.status {
            ArtifactStatus::Created => stats.thumbnails_created += 1,
            _ => stats.thumbnails_reused += 1,
        }
        match link.status {
            ArtifactStatus::Reused => stats.links_reused += 1,
            _ => stats.links_created += 1,
        }

        // Both artifacts are named after the source, so the relative paths
        // follow from the file name alone.
        let name = thumbnail
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        records.push(ImageRecord {
            display_name: String::new(),
            source_path,
            thumbnail_path: format!("{}/{}", config.thumbnail_dir, name),
            link_path: name,
        });

        if let Some(tx) = &events {
            tx.send(GalleryEvent::ImageProcessed {
                index,
                total,
                source: image.clone(),
                thumbnail: thumbnail.status,
                link: link.status,
            })
            .ok();
        }
    }

    let html = render_gallery_page(&records, body_copy.html(), &config.style).into_string();
    let index_path = write_index(output_dir, &html)?;
    tracing::info!(
        path = %index_path.display(),
        images = records.len(),
        failed = failures.len(),
        "gallery page written"
    );

    Ok(GalleryOutput {
        html,
        index_path,
        records,
        failures,
        body_copy,
        stats,
    })
}
