//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`operations`](super::operations) module (which
//! decides which variant to produce and where it goes) and the
//! [`backend`](super::backend) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (1-100, default 90). Clamped on construction.
//! - [`ResizeMode`]: crop-to-fill (center anchor) or scale-to-fit.
//! - [`ResizeParams`]: one resize job; source, output path, target dimensions, mode, quality.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

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
        Self(90)
    }
}

/// How the source is mapped onto the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Cover the target box, then center-crop to its exact size.
    Fill,
    /// Scale to the target size; the planner already preserved the aspect ratio.
    Fit,
}

/// Parameters for a single resize operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
    pub quality: Quality,
}
