//! High-level image operations.
//!
//! [`LocalEngine`] combines the upload directory mapping, the pure planning
//! in [`calculations`](super::calculations) and an [`ImageBackend`] into a
//! [`ResizeEngine`]: give it the public URL of an upload and a target size,
//! get back the public URL and dimensions of a matching variant.
//!
//! Variants are written next to their source as `{stem}-{w}x{h}.{ext}`. The
//! name depends only on the source and the output size, so a second request
//! for the same size reuses the file that is already there.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{ResizePlan, plan_resize, variant_file_name};
use super::params::{Quality, ResizeParams};
use crate::uploads::{AttachmentError, ImageProbe, UploadDir, probe};
use crate::urls;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error(
        "source is {source_width}x{source_height}, cannot crop to {width}x{height} without upscaling"
    )]
    TooSmall {
        source_width: u32,
        source_height: u32,
        width: u32,
        height: u32,
    },
}

/// One resize request, as issued by the markup layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest<'a> {
    pub url: &'a str,
    pub width: u32,
    /// `None` keeps the source aspect ratio.
    pub height: Option<u32>,
    pub crop: bool,
    pub upscale: bool,
}

/// A variant ready to be referenced from markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resized {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Produces resized variants of an image URL.
pub trait ResizeEngine {
    fn resize(&self, request: &ResizeRequest<'_>) -> Result<Resized, ResizeError>;
}

impl<E: ResizeEngine + ?Sized> ResizeEngine for &E {
    fn resize(&self, request: &ResizeRequest<'_>) -> Result<Resized, ResizeError> {
        (**self).resize(request)
    }
}

/// Resize engine working on the local upload directory.
pub struct LocalEngine<B: ImageBackend> {
    uploads: UploadDir,
    backend: B,
    quality: Quality,
}

impl<B: ImageBackend> LocalEngine<B> {
    pub fn new(uploads: UploadDir, backend: B, quality: Quality) -> Self {
        Self {
            uploads,
            backend,
            quality,
        }
    }

    pub fn uploads(&self) -> &UploadDir {
        &self.uploads
    }
}

impl<B: ImageBackend> ResizeEngine for LocalEngine<B> {
    fn resize(&self, request: &ResizeRequest<'_>) -> Result<Resized, ResizeError> {
        let source = self.uploads.local_path(request.url)?;
        let original = probe(&self.backend, &source)?;

        let (width, height, mode) = match plan_resize(
            original,
            request.width,
            request.height,
            request.crop,
            request.upscale,
        ) {
            ResizePlan::Original => {
                return Ok(Resized {
                    url: request.url.to_string(),
                    width: original.width,
                    height: original.height,
                });
            }
            ResizePlan::TooSmall => {
                return Err(ResizeError::TooSmall {
                    source_width: original.width,
                    source_height: original.height,
                    width: request.width,
                    height: request.height.unwrap_or_default(),
                });
            }
            ResizePlan::Resize {
                width,
                height,
                mode,
            } => (width, height, mode),
        };

        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AttachmentError::InvalidFormat(source.display().to_string()))?;
        let variant_name = variant_file_name(file_name, width, height);
        let output = source.with_file_name(&variant_name);

        if output.is_file() && self.backend.identify(&output).is_ok() {
            tracing::debug!(variant = %output.display(), "reusing resized variant");
        } else {
            self.backend.resize(&ResizeParams {
                source: source.clone(),
                output: output.clone(),
                width,
                height,
                mode,
                quality: self.quality,
            })?;
            tracing::debug!(
                source = %source.display(),
                variant = %output.display(),
                width,
                height,
                "wrote resized variant"
            );
        }

        Ok(Resized {
            url: urls::replace_file_name(request.url, &variant_name),
            width,
            height,
        })
    }
}

impl<B: ImageBackend> ImageProbe for LocalEngine<B> {
    fn dimensions(&self, url: &str) -> Result<Dimensions, AttachmentError> {
        let path = self.uploads.local_path(url)?;
        probe(&self.backend, &path)
    }
}
