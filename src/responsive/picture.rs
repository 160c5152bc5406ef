//! `<picture>` element: ordered sources plus a fallback `<img>`.

use super::attrs::{AttrValue, Attributes, is_protected};
use super::filters::Filters;
use super::img::{IMG_OMIT_IF_EMPTY, ImageInput};
use super::origin::{Origin, VECTOR_MARKER};
use super::source::Source;
use super::Result;
use crate::uploads::ImageProbe;
use maud::{Markup, PreEscaped, Render};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    picture_attrs: Attributes,
    img_attrs: Attributes,
    sources: Vec<Source>,
}

impl Picture {
    /// Build a `<picture>`.
    ///
    /// A vector fallback drops every source. Explicit width and height are
    /// used for both kinds of image; without them only rasters are probed.
    pub fn make(input: &ImageInput<'_>, sources: Vec<Source>, probe: &dyn ImageProbe) -> Result<Self> {
        let origin = Origin::parse(input.src)?;

        let mut img_attrs = Attributes::new();
        img_attrs.set("src", origin.url()).set("alt", input.alt);
        if input.lazy {
            img_attrs.set("loading", "lazy");
        }
        if origin.is_vector() {
            img_attrs.set(VECTOR_MARKER, 1u32);
        }
        if let Some(dims) = origin.resolve_dimensions(input.width, input.height, probe)? {
            img_attrs.set("width", dims.width).set("height", dims.height);
        }

        let sources = if origin.is_vector() { Vec::new() } else { sources };

        Ok(Self {
            picture_attrs: Attributes::new(),
            img_attrs,
            sources,
        })
    }

    /// Attribute on the `<picture>` element. Any name is accepted.
    pub fn set_picture_attr(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.picture_attrs.set(name, value);
        self
    }

    /// Attribute on the fallback `<img>`. `src`, `srcset` and `sizes` are ignored.
    pub fn set_img_attr(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
        if !is_protected(name) {
            self.img_attrs.set(name, value);
        }
        self
    }

    pub fn picture_attrs(&self) -> &Attributes {
        &self.picture_attrs
    }

    pub fn img_attrs(&self) -> &Attributes {
        &self.img_attrs
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn render(&self) -> String {
        self.render_with(&Filters::default())
    }

    pub fn render_with(&self, filters: &Filters) -> String {
        let mut out = filters
            .picture(self.picture_attrs.clone())
            .render_tag("picture", &[]);
        for source in &self.sources {
            out.push_str("\n\t");
            out.push_str(&source.render_with(filters));
        }
        out.push_str("\n\t");
        out.push_str(
            &filters
                .picture_img(self.img_attrs.clone())
                .render_tag("img", &IMG_OMIT_IF_EMPTY),
        );
        out.push_str("\n</picture>");
        out
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Render for Picture {
    fn render(&self) -> Markup {
        PreEscaped(Picture::render(self))
    }
}
