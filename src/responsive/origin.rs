//! The image an element is built from.
//!
//! Vector images (SVG) scale freely: they get no resized variants and no
//! probed dimensions, and the fallback image carries a `data-is_svg` marker.
//! [`Origin`] is the only place that makes that distinction.

use super::{Error, Result};
use crate::imaging::Dimensions;
use crate::uploads::ImageProbe;
use crate::urls;

/// Attribute set on the `<img>` of a vector origin.
pub const VECTOR_MARKER: &str = "data-is_svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Raster(String),
    Vector(String),
}

impl Origin {
    /// Classify a URL by its path extension. Empty URLs are rejected.
    pub fn parse(url: &str) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(Error::InvalidInput("image src is empty".into()));
        }
        if urls::is_svg_url(url) {
            Ok(Origin::Vector(url.to_string()))
        } else {
            Ok(Origin::Raster(url.to_string()))
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Origin::Raster(url) | Origin::Vector(url) => url,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Origin::Vector(_))
    }

    /// Width and height for the element.
    ///
    /// Both explicit and non-zero: used as given, nothing is probed.
    /// Otherwise rasters are probed and vectors have none.
    pub fn resolve_dimensions(
        &self,
        width: Option<u32>,
        height: Option<u32>,
        probe: &dyn ImageProbe,
    ) -> Result<Option<Dimensions>> {
        match (width, height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok(Some(Dimensions::new(w, h))),
            _ => match self {
                Origin::Vector(_) => Ok(None),
                Origin::Raster(url) => Ok(Some(probe.dimensions(url)?)),
            },
        }
    }
}
