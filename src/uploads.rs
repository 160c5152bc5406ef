//! Upload directory mapping.
//!
//! Every image the markup layer can measure or resize lives in one local
//! directory that is served under one public base URL:
//!
//! ```text
//! base_dir = "uploads"                     base_url = "https://example.com/uploads"
//! uploads/2024/05/dawn.jpg          <->    https://example.com/uploads/2024/05/dawn.jpg
//! ```
//!
//! [`UploadDir::local_path`] turns a public URL back into a file path, and
//! [`probe`] reads the pixel dimensions of that file through an
//! [`ImageBackend`]. URLs outside the base are rejected with
//! [`AttachmentError::NotLocal`]; remote fetching is not supported.

use crate::imaging::{Dimensions, ImageBackend};
use crate::urls;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("empty image URL")]
    EmptyUrl,
    #[error("not a local upload: {0}")]
    NotLocal(String),
    #[error("image file not found: {0}")]
    NotFound(PathBuf),
    #[error("not a readable image: {0}")]
    InvalidFormat(String),
}

/// Anything that can report the pixel dimensions behind an image URL.
pub trait ImageProbe {
    fn dimensions(&self, url: &str) -> Result<Dimensions, AttachmentError>;
}

impl<P: ImageProbe + ?Sized> ImageProbe for &P {
    fn dimensions(&self, url: &str) -> Result<Dimensions, AttachmentError> {
        (**self).dimensions(url)
    }
}

/// The local upload directory and the public URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDir {
    pub base_dir: PathBuf,
    pub base_url: String,
}

impl UploadDir {
    pub fn new(base_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url: base_url.into(),
        }
    }

    /// Whether the public base URL is served over https.
    pub fn is_https(&self) -> bool {
        Url::parse(&self.base_url).is_ok_and(|base| base.scheme() == "https")
    }

    /// Map a public URL to the file it names inside `base_dir`.
    ///
    /// Both URLs are parsed, so case in scheme and host, default ports and dot
    /// segments do not matter. The scheme of the base URL is ignored:
    /// `https://`, `http://` and protocol-relative `//` forms of the same
    /// address all resolve to the same file. Root-relative URLs
    /// (`/uploads/a.jpg`) are matched against the path of the base URL.
    pub fn local_path(&self, url: &str) -> Result<PathBuf, AttachmentError> {
        if url.trim().is_empty() {
            return Err(AttachmentError::EmptyUrl);
        }
        let not_local = || AttachmentError::NotLocal(url.to_string());

        let base = urls::resolve(&self.base_url, false).ok_or_else(not_local)?;
        let target = urls::resolve(url, base.scheme() == "https").ok_or_else(not_local)?;

        if urls::UrlForm::of(url) != urls::UrlForm::RootRelative
            && (target.host_str() != base.host_str() || target.port() != base.port())
        {
            return Err(not_local());
        }

        let mut segments = target.path_segments().ok_or_else(not_local)?;
        let base_segments = base
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty());
        // Segment-wise, so "uploads-old/a.jpg" is not inside "uploads".
        for expected in base_segments {
            if segments.next() != Some(expected) {
                return Err(not_local());
            }
        }

        let mut path = self.base_dir.clone();
        let mut file_found = false;
        for segment in segments {
            path.push(decode_segment(segment).ok_or_else(not_local)?);
            file_found = true;
        }
        if !file_found {
            return Err(not_local());
        }
        Ok(path)
    }
}

/// Percent-decode one path segment. Segments that would escape the directory
/// once decoded (`..`, embedded separators) or are empty are refused.
fn decode_segment(segment: &str) -> Option<String> {
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    if decoded.is_empty()
        || decoded == "."
        || decoded == ".."
        || decoded.contains(['/', '\\'])
    {
        return None;
    }
    Some(decoded.into_owned())
}

/// Read the dimensions of a local image file.
pub fn probe(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions, AttachmentError> {
    if !path.is_file() {
        return Err(AttachmentError::NotFound(path.to_path_buf()));
    }
    let dims = backend
        .identify(path)
        .map_err(|e| AttachmentError::InvalidFormat(format!("{}: {e}", path.display())))?;
    if dims.width == 0 || dims.height == 0 {
        return Err(AttachmentError::InvalidFormat(format!(
            "{}: zero-sized image",
            path.display()
        )));
    }
    Ok(dims)
}
