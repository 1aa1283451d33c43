//! Thumbnail generation.
//!
//! | Operation | Backend |
//! |---|---|
//! | **Thumbnail** via ImageMagick | [`MagickBackend`] (`convert` subprocess) |
//! | **Thumbnail** in process | [`RustBackend`] (`image` crate, `resize_to_fill`) |
//!
//! The module is split into:
//! - **Parameters**: data describing a thumbnail operation
//! - **Backend**: [`ImageBackend`] trait plus the two implementations
//! - **Operations**: path planning, skip-if-exists and cleanup around the backend

pub mod backend;
pub mod magick_backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use magick_backend::MagickBackend;
pub use operations::{ThumbnailConfig, ThumbnailOutcome, create_thumbnail, plan_thumbnail};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
