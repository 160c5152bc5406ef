//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG, PNG, GIF, TIFF, WebP) | `image::ImageReader` |
//! | Resize → fit | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Resize → fill | `DynamicImage::resize_to_fill` (center crop) |
//! | Encode | same format as the output extension; JPEG honours quality |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ResizeMode, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
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

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        BackendError::ProcessingFailed(format!("Unsupported output format {}: {e}", path.display()))
    })?;

    match format {
        ImageFormat::Jpeg => save_jpeg(img, path, quality),
        ImageFormat::Png | ImageFormat::Gif | ImageFormat::Tiff | ImageFormat::WebP => img
            .save_with_format(path, format)
            .map_err(|e| BackendError::ProcessingFailed(format!("Encode failed: {e}"))),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {other:?}"
        ))),
    }
}

/// JPEG has no alpha channel, so the image is flattened to RGB first.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = match params.mode {
            ResizeMode::Fill => img.resize_to_fill(params.width, params.height, FilterType::Lanczos3),
            ResizeMode::Fit => img.resize_exact(params.width, params.height, FilterType::Lanczos3),
        };
        save_image(&resized, &params.output, params.quality.value())
    }
}
