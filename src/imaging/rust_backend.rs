//! Pure Rust image processing backend.
//!
//! No external programs: decoding, resampling and encoding all happen in
//! process with the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF) | `image::ImageReader` |
//! | Cover resize + center crop | `image::DynamicImage::resize_to_fill` (Lanczos3) |
//! | Encode JPEG with quality | `image::codecs::jpeg::JpegEncoder` |
//! | Encode PNG / GIF | `image::DynamicImage::write_to` |

use super::backend::{BackendError, ImageBackend};
use super::params::ThumbnailParams;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, sniffing the format from content.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode `img` at `path`, picking the format from the output extension.
///
/// Quality only applies to JPEG; PNG and GIF are lossless/palette formats.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Unsupported output format for {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(File::create(path)?);
    let result = match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let quality = u8::try_from(quality).unwrap_or(100);
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
        }
        other => img.write_to(&mut writer, other),
    };

    result.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let thumb = img.resize_to_fill(params.size, params.size, FilterType::Lanczos3);
        save_image(&thumb, &params.output, params.quality.value())
    }
}
