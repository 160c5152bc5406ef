//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the markup layer
//! needs from a pixel engine: identify (read dimensions) and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust, built on the
//! `image` crate. Tests use the recording `MockBackend` below.

use super::params::ResizeParams;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding the pixel data where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a resize operation and write the result to `params.output`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

impl<B: ImageBackend + ?Sized> ImageBackend for &B {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        (**self).identify(path)
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        (**self).resize(params)
    }
}
