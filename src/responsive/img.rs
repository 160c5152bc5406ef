//! Standalone `<img>` element.

use super::attrs::{AttrValue, Attributes, is_protected};
use super::filters::Filters;
use super::origin::{Origin, VECTOR_MARKER};
use super::size::{self, Size};
use super::srcset_item::{self, SrcsetItem};
use super::Result;
use crate::uploads::ImageProbe;
use maud::{Markup, PreEscaped, Render};
use std::fmt;

/// Attributes of any `<img>` left out when empty.
pub(super) const IMG_OMIT_IF_EMPTY: [&str; 2] = ["srcset", "sizes"];

/// The image-level inputs shared by [`Img`] and
/// [`Picture`](super::Picture).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageInput<'a> {
    pub src: &'a str,
    pub alt: &'a str,
    /// Explicit dimensions are used only when both are set and non-zero.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub lazy: bool,
}

impl<'a> ImageInput<'a> {
    pub fn new(src: &'a str, alt: &'a str) -> Self {
        Self {
            src,
            alt,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Img {
    attrs: Attributes,
}

impl Img {
    /// Build an `<img>`.
    ///
    /// Vector sources get only the `data-is_svg` marker after `src`, `alt`
    /// and `loading`. Raster sources get `sizes`, `width`, `height` and
    /// `srcset`, with the dimensions probed from disk unless both are given.
    pub fn make(
        input: &ImageInput<'_>,
        srcset_items: &[SrcsetItem],
        sizes: &[Size],
        probe: &dyn ImageProbe,
    ) -> Result<Self> {
        let origin = Origin::parse(input.src)?;

        let mut attrs = Attributes::new();
        attrs.set("src", origin.url()).set("alt", input.alt);
        if input.lazy {
            attrs.set("loading", "lazy");
        }

        if origin.is_vector() {
            attrs.set(VECTOR_MARKER, 1u32);
        } else {
            attrs.set("sizes", size::join(sizes));
            if let Some(dims) = origin.resolve_dimensions(input.width, input.height, probe)? {
                attrs.set("width", dims.width).set("height", dims.height);
            }
            attrs.set("srcset", srcset_item::join(srcset_items));
        }

        Ok(Self { attrs })
    }

    /// Set an extra attribute. `src`, `srcset` and `sizes` are ignored.
    pub fn set_attr(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
        if !is_protected(name) {
            self.attrs.set(name, value);
        }
        self
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn render(&self) -> String {
        self.render_with(&Filters::default())
    }

    pub fn render_with(&self, filters: &Filters) -> String {
        filters
            .img(self.attrs.clone())
            .render_tag("img", &IMG_OMIT_IF_EMPTY)
    }
}

impl fmt::Display for Img {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Render for Img {
    fn render(&self) -> Markup {
        PreEscaped(Img::render(self))
    }
}
