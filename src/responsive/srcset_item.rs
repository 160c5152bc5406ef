//! One `srcset` candidate.

use super::origin::Origin;
use super::resizer::Resizer;
use super::{Error, Result};
use crate::imaging::ResizeEngine;
use std::fmt;

/// A candidate URL with its width (`400w`) or density (`2x`) descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcsetItem {
    url: String,
    descriptor: String,
    width: Option<u32>,
    height: Option<u32>,
}

fn check_descriptor(descriptor: &str) -> Result<()> {
    if descriptor.ends_with('w') || descriptor.ends_with('x') {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "srcset descriptor must end in 'w' or 'x', got {descriptor:?}"
        )))
    }
}

impl SrcsetItem {
    pub fn make(
        url: impl Into<String>,
        descriptor: impl Into<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Self> {
        let url = url.into();
        let descriptor = descriptor.into();
        if url.trim().is_empty() {
            return Err(Error::InvalidInput("srcset URL is empty".into()));
        }
        check_descriptor(&descriptor)?;
        Ok(Self {
            url,
            descriptor,
            width,
            height,
        })
    }

    /// Candidate for the variant `resizer` describes.
    ///
    /// Vector origins are used as they are; the engine is not called.
    pub fn make_with_resize(
        resizer: &Resizer,
        descriptor: &str,
        engine: &dyn ResizeEngine,
    ) -> Result<Self> {
        check_descriptor(descriptor)?;
        let origin = Origin::parse(resizer.origin_url().unwrap_or_default())?;
        if origin.is_vector() {
            return Self::make(origin.url(), descriptor, None, None);
        }
        let resized = resizer.resize(engine)?;
        Self::make(
            resized.url,
            descriptor,
            Some(resized.width),
            Some(resized.height),
        )
    }

    /// Parse a rendered candidate such as `"a-400x300.jpg 400w"`.
    pub fn parse(candidate: &str) -> Result<Self> {
        let mut parts = candidate.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(url), Some(descriptor), None) => Self::make(url, descriptor, None, None),
            _ => Err(Error::InvalidInput(format!(
                "not a srcset candidate: {candidate:?}"
            ))),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn render(&self) -> String {
        format!("{} {}", self.url, self.descriptor)
    }
}

impl fmt::Display for SrcsetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// `", "`-joined candidates.
pub(crate) fn join(items: &[SrcsetItem]) -> String {
    items
        .iter()
        .map(SrcsetItem::render)
        .collect::<Vec<_>>()
        .join(", ")
}
