//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between thumbnail planning
//! and pixel work. Two production implementations exist:
//!
//! - [`MagickBackend`](super::magick_backend::MagickBackend) shells out to
//!   ImageMagick's `convert` (the default).
//! - [`RustBackend`](super::rust_backend::RustBackend) does the same
//!   resize-and-crop in process with the `image` crate.

use super::params::ThumbnailParams;
use crate::tool::ToolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("External tool failed: {0}")]
    Tool(#[from] ToolError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Execute a thumbnail operation (cover resize + center crop + encode).
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that records operations instead of decoding images.
    ///
    /// Successful thumbnails write a small placeholder file at the output path
    /// so idempotence checks see it on the next run. Sources listed in
    /// `failing` produce an error and leave a partial file behind, like a
    /// tool that died halfway through writing.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Mutex<Vec<RecordedOp>>,
        pub failing: Vec<PathBuf>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Thumbnail {
            source: String,
            output: String,
            size: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(sources: Vec<PathBuf>) -> Self {
            Self {
                operations: Mutex::new(Vec::new()),
                failing: sources,
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Thumbnail {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                size: params.size,
                quality: params.quality.value(),
            });

            if self.failing.iter().any(|f| f == &params.source) {
                std::fs::write(&params.output, b"partial")?;
                return Err(BackendError::ProcessingFailed(format!(
                    "mock failure for {}",
                    params.source.display()
                )));
            }

            std::fs::write(&params.output, b"thumb")?;
            Ok(())
        }
    }

    #[test]
    fn mock_records_thumbnail() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::new();
        let output = tmp.path().join("a.jpg");

        backend
            .thumbnail(&ThumbnailParams {
                source: "/source/a.jpg".into(),
                output: output.clone(),
                size: 640,
                quality: crate::imaging::Quality::new(60),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Thumbnail { size: 640, quality: 60, source, .. } if source == "/source/a.jpg"
        ));
        assert!(output.exists());
    }
}
