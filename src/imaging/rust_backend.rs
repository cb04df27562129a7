//! Builtin backend: thumbnails decoded and resized in-process.
//!
//! Thumbnails use the `image` crate (JPEG, PNG, TIFF and WebP) with a
//! Lanczos3 filter, written in the format the output extension names.
//! Files the crate cannot decode, such as movies or RAW originals, fail with
//! [`ToolError::ProcessingFailed`].
//!
//! There is no in-process lossless JPEG optimizer, so re-encoding still runs
//! the configured external command.

use super::backend::{MediaTool, ToolError};
use super::calculations::fit_within;
use super::command::{CommandTemplate, reencode_with};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::path::Path;

/// In-process thumbnails, external re-encoding.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTool {
    reencode: CommandTemplate,
}

impl BuiltinTool {
    pub fn new(reencode: CommandTemplate) -> Self {
        Self { reencode }
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, ToolError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            ToolError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save in the format named by the extension of `path`.
fn save_image(img: &DynamicImage, path: &Path) -> Result<(), ToolError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        ToolError::ProcessingFailed(format!("Unsupported output format: {}", path.display()))
    })?;
    // JPEG has no alpha channel.
    let result = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(path, format)
    } else {
        img.save_with_format(path, format)
    };
    result.map_err(|e| {
        ToolError::ProcessingFailed(format!("Failed to write {}: {}", path.display(), e))
    })
}

impl MediaTool for BuiltinTool {
    fn reencode(&self, path: &Path) -> Result<(), ToolError> {
        reencode_with(&self.reencode, path)
    }

    fn thumbnail(&self, source: &Path, output: &Path, max_dim: u32) -> Result<(), ToolError> {
        let img = load_image(source)?;
        let (width, height) = fit_within(img.dimensions(), max_dim);
        let scaled = if (width, height) == img.dimensions() {
            img
        } else {
            img.resize_exact(width, height, FilterType::Lanczos3)
        };
        save_image(&scaled, output)
    }
}
