//! Gallery configuration.
//!
//! One [`GalleryConfig`] is assembled at startup from stock defaults with
//! command-line flags layered on top, validated once, and then passed by
//! reference to the thumbnail generator and the page renderer. Nothing reads
//! configuration from files.
//!
//! ## Options
//!
//! ```toml
//! # All values shown are the defaults
//!
//! thumbnail_dir = "thumbnails"   # Subfolder of the output directory
//!
//! [thumbnail]
//! size = 640                     # Edge of the square crop, in pixels
//! quality = 60                   # Encoding quality (1-100)
//!
//! [style]
//! title = "Gallery"              # Page <title>
//! css = "..."                    # Stock stylesheet (static/style.css)
//! ```
//!
//! `photo-tiles show-config` prints the effective values in this format.

use crate::imaging::{Quality, ThumbnailConfig};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use thiserror::Error;

/// Stock stylesheet embedded at compile time.
pub const STOCK_CSS: &str = include_str!("../static/style.css");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Process-wide settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Name of the thumbnail subfolder inside the output directory.
    pub thumbnail_dir: String,
    pub thumbnail: ThumbnailSettings,
    pub style: StyleConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            thumbnail_dir: "thumbnails".to_string(),
            thumbnail: ThumbnailSettings::default(),
            style: StyleConfig::default(),
        }
    }
}

/// Thumbnail size and encoding quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailSettings {
    /// Edge length of the square thumbnail.
    pub size: u32,
    /// Lossy encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            size: 640,
            quality: 60,
        }
    }
}

/// Page title and stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub title: String,
    pub css: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            css: STOCK_CSS.to_string(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.size == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.size must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::Validation(
                "thumbnail.quality must be 1-100".into(),
            ));
        }
        let mut components = Path::new(&self.thumbnail_dir).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(ConfigError::Validation(format!(
                "thumbnail_dir must be a single folder name, got '{}'",
                self.thumbnail_dir
            )));
        }
        Ok(())
    }

    /// Thumbnail parameters for the imaging module.
    pub fn thumbnail_config(&self) -> ThumbnailConfig {
        ThumbnailConfig {
            size: self.thumbnail.size,
            quality: Quality::new(self.thumbnail.quality),
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
