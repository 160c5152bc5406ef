//! Shared test utilities for the responsive-img test suite.
//!
//! Provides recording mocks for the two collaborators the value objects and
//! builders talk to ([`ResizeEngine`] and [`ImageProbe`]) and a synthetic
//! JPEG writer for tests that go through the real backend.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let engine = MockEngine::new();
//! let probe = MockProbe::new(1600, 900);
//!
//! // ... build markup ...
//!
//! assert_eq!(engine.requests().len(), 4);
//! assert_eq!(probe.call_count(), 1);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::imaging::{
    BackendError, Dimensions, ResizeEngine, ResizeError, ResizeRequest, Resized,
    variant_file_name,
};
use crate::uploads::{AttachmentError, ImageProbe};
use crate::urls;

// =========================================================================
// Images on disk
// =========================================================================

/// Write a gradient JPEG of the given size, creating parent directories.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

// =========================================================================
// Resize engine
// =========================================================================

/// Owned copy of a [`ResizeRequest`] as seen by [`MockEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub width: u32,
    pub height: Option<u32>,
    pub crop: bool,
    pub upscale: bool,
}

/// Engine that records requests and answers with predictable variant URLs.
///
/// A request for `https://h/up/a.jpg` at 400x225 returns
/// `https://h/up/a-400x225.jpg`. Without a height the source is taken to be
/// 4:3.
#[derive(Default)]
pub struct MockEngine {
    requests: Mutex<Vec<RecordedRequest>>,
    fail: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose every request fails after being recorded.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(width, height)` of every request, in order.
    pub fn sizes(&self) -> Vec<(u32, Option<u32>)> {
        self.requests()
            .iter()
            .map(|r| (r.width, r.height))
            .collect()
    }
}

impl ResizeEngine for MockEngine {
    fn resize(&self, request: &ResizeRequest<'_>) -> Result<Resized, ResizeError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: request.url.to_string(),
            width: request.width,
            height: request.height,
            crop: request.crop,
            upscale: request.upscale,
        });
        if self.fail {
            return Err(ResizeError::Backend(BackendError::ProcessingFailed(
                "mock failure".into(),
            )));
        }

        let width = request.width;
        let height = request.height.unwrap_or(width * 3 / 4);
        let file_name = urls::file_name(request.url);
        Ok(Resized {
            url: urls::replace_file_name(request.url, &variant_file_name(&file_name, width, height)),
            width,
            height,
        })
    }
}

// =========================================================================
// Probe
// =========================================================================

/// Probe that reports fixed dimensions (or fails) and counts calls.
pub struct MockProbe {
    dims: Option<Dimensions>,
    calls: Mutex<Vec<String>>,
}

impl MockProbe {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dims: Some(Dimensions::new(width, height)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Probe that reports every file as missing.
    pub fn failing() -> Self {
        Self {
            dims: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ImageProbe for MockProbe {
    fn dimensions(&self, url: &str) -> Result<Dimensions, AttachmentError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.dims
            .ok_or_else(|| AttachmentError::NotFound(PathBuf::from(urls::url_path(url))))
    }
}
