//! ImageMagick backend: runs `convert` as a subprocess.
//!
//! The command line mirrors what a photographer would type by hand:
//!
//! ```text
//! convert <source> -resize 640x640^ -gravity Center -crop 640x640+0+0 +repage -quality 60 <output>
//! ```
//!
//! `^` makes the resize cover the box (smaller dimension matches), the
//! centered crop trims the overflow, and `+repage` drops the virtual canvas
//! offset the crop leaves behind. Arguments are passed as a list, never
//! through a shell.

use super::backend::{BackendError, ImageBackend};
use super::params::ThumbnailParams;
use crate::tool::{Invocation, SystemRunner, ToolRunner};

/// Default ImageMagick executable name.
pub const CONVERT: &str = "convert";

pub struct MagickBackend<R: ToolRunner = SystemRunner> {
    runner: R,
    program: String,
}

impl MagickBackend<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for MagickBackend<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ToolRunner> MagickBackend<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            program: CONVERT.to_string(),
        }
    }

    /// Use a different executable (e.g. `magick` on ImageMagick 7 installs).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Build the `convert` invocation for a thumbnail without running it.
    pub fn plan(&self, params: &ThumbnailParams) -> Invocation {
        Invocation::new(self.program.clone())
            .arg(params.source.as_os_str())
            .args(["-resize".to_string(), params.fill_geometry()])
            .args(["-gravity", "Center"])
            .args(["-crop".to_string(), params.crop_geometry()])
            .arg("+repage")
            .args(["-quality".to_string(), params.quality.value().to_string()])
            .arg(params.output.as_os_str())
    }
}

impl<R: ToolRunner> ImageBackend for MagickBackend<R> {
    fn name(&self) -> &'static str {
        "imagemagick"
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        self.runner.run(&self.plan(params))?;
        if !params.output.exists() {
            return Err(BackendError::ProcessingFailed(format!(
                "{} reported success but wrote no file at {}",
                self.program,
                params.output.display()
            )));
        }
        Ok(())
    }
}
