//! High-level image operations.
//!
//! These functions decide where a thumbnail lives and whether it has to be
//! produced at all, then hand the pixel work to an [`ImageBackend`].

use super::backend::{BackendError, ImageBackend};
use super::params::{Quality, ThumbnailParams};
use crate::types::ArtifactStatus;
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    /// Edge length of the square thumbnail.
    pub size: u32,
    pub quality: Quality,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: 640,
            quality: Quality::default(),
        }
    }
}

/// A thumbnail on disk, and whether this run produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailOutcome {
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// Plan a thumbnail operation without executing it.
///
/// The thumbnail keeps the source's file name inside `thumb_dir`.
pub fn plan_thumbnail(
    source: &Path,
    thumb_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<ThumbnailParams> {
    let name = source.file_name().ok_or_else(|| {
        BackendError::ProcessingFailed(format!("{} has no file name", source.display()))
    })?;

    Ok(ThumbnailParams {
        source: source.to_path_buf(),
        output: thumb_dir.join(name),
        size: config.size,
        quality: config.quality,
    })
}

/// Create a square thumbnail for `source` inside `thumb_dir`.
///
/// The directory is created on demand. An existing file at the target path
/// is trusted as-is and returned without invoking the backend. When the
/// backend fails, whatever it left at the target path is removed so the next
/// run does not mistake a partial file for a finished thumbnail.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    thumb_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<ThumbnailOutcome> {
    let params = plan_thumbnail(source, thumb_dir, config)?;

    // create_dir_all succeeds when another caller created it first
    fs::create_dir_all(thumb_dir)?;

    if params.output.exists() {
        tracing::info!(path = %params.output.display(), "thumbnail already exists, skipping");
        return Ok(ThumbnailOutcome {
            path: params.output,
            status: ArtifactStatus::Reused,
        });
    }

    if let Err(err) = backend.thumbnail(&params) {
        discard_partial(&params.output);
        return Err(err);
    }

    tracing::debug!(
        backend = backend.name(),
        path = %params.output.display(),
        "thumbnail created"
    );
    Ok(ThumbnailOutcome {
        path: params.output,
        status: ArtifactStatus::Created,
    })
}

fn discard_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial thumbnail"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "could not remove partial thumbnail"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use tempfile::TempDir;

    #[test]
    fn plan_thumbnail_keeps_basename() {
        let params = plan_thumbnail(
            Path::new("/photos/2016/a.jpg"),
            Path::new("/out/thumbnails"),
            &ThumbnailConfig::default(),
        )
        .unwrap();

        assert_eq!(params.output, PathBuf::from("/out/thumbnails/a.jpg"));
        assert_eq!(params.size, 640);
        assert_eq!(params.quality.value(), 60);
    }

    #[test]
    fn plan_thumbnail_rejects_path_without_file_name() {
        let err = plan_thumbnail(
            Path::new("/"),
            Path::new("/out/thumbnails"),
            &ThumbnailConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BackendError::ProcessingFailed(_)));
    }

    #[test]
    fn create_thumbnail_makes_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let thumb_dir = tmp.path().join("deep/nested/thumbnails");
        let backend = MockBackend::new();

        let outcome = create_thumbnail(
            &backend,
            Path::new("/photos/a.jpg"),
            &thumb_dir,
            &ThumbnailConfig::default(),
        )
        .unwrap();

        assert!(thumb_dir.is_dir());
        assert_eq!(outcome.path, thumb_dir.join("a.jpg"));
        assert_eq!(outcome.status, ArtifactStatus::Created);
    }

    #[test]
    fn second_run_reuses_without_calling_backend() {
        let tmp = TempDir::new().unwrap();
        let thumb_dir = tmp.path().join("thumbnails");
        let backend = MockBackend::new();
        let config = ThumbnailConfig {
            size: 800,
            quality: Quality::new(80),
        };

        let first = create_thumbnail(&backend, Path::new("/p/a.jpg"), &thumb_dir, &config).unwrap();
        let second =
            create_thumbnail(&backend, Path::new("/p/a.jpg"), &thumb_dir, &config).unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(second.status, ArtifactStatus::Reused);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Thumbnail {
                size: 800,
                quality: 80,
                ..
            }
        ));
    }

    #[test]
    fn failure_removes_partial_output() {
        let tmp = TempDir::new().unwrap();
        let thumb_dir = tmp.path().join("thumbnails");
        let source = PathBuf::from("/p/bad.jpg");
        let backend = MockBackend::failing_on(vec![source.clone()]);

        let err = create_thumbnail(&backend, &source, &thumb_dir, &ThumbnailConfig::default())
            .unwrap_err();

        assert!(matches!(err, BackendError::ProcessingFailed(_)));
        assert!(!thumb_dir.join("bad.jpg").exists());
    }
}
