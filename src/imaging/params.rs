//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! [`operations`](super::operations), which decides where a thumbnail goes and
//! whether it is needed at all, and the [`backend`](super::backend), which
//! does the pixel work. Swapping backends (ImageMagick, pure Rust, a test
//! mock) never touches operation logic.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
///
/// Only [`Quality::new`] builds one, so the value is always in range:
///
/// ```compile_fail
/// let q = photo_tiles::imaging::Quality(500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(60)
    }
}

/// Parameters for a square thumbnail: resize to cover `size × size`, then
/// center-crop to exactly that square.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Edge length of the square crop, in pixels.
    pub size: u32,
    pub quality: Quality,
}

impl ThumbnailParams {
    /// ImageMagick geometry for the cover resize, e.g. `640x640^`.
    pub fn fill_geometry(&self) -> String {
        format!("{0}x{0}^", self.size)
    }

    /// ImageMagick geometry for the centered crop, e.g. `640x640+0+0`.
    pub fn crop_geometry(&self) -> String {
        format!("{0}x{0}+0+0", self.size)
    }
}
