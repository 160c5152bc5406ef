//! `<source>` element of a `<picture>`.

use super::attrs::{AttrValue, Attributes, is_protected};
use super::filters::Filters;
use super::size::{self, Size};
use super::srcset_item::SrcsetItem;
use super::{Error, Result};
use maud::{Markup, PreEscaped, Render};
use std::fmt;

const OMIT_IF_EMPTY: [&str; 4] = ["srcset", "sizes", "media", "type"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    attrs: Attributes,
}

impl Source {
    /// Build from at least one candidate. Candidates that render the same
    /// are listed once, at their first position.
    pub fn make(
        srcset_items: &[SrcsetItem],
        sizes: &[Size],
        media: &str,
        mime_type: &str,
    ) -> Result<Self> {
        if srcset_items.is_empty() {
            return Err(Error::InvalidInput("source needs at least one srcset item".into()));
        }

        let mut candidates: Vec<String> = Vec::with_capacity(srcset_items.len());
        for rendered in srcset_items.iter().map(SrcsetItem::render) {
            if !candidates.contains(&rendered) {
                candidates.push(rendered);
            }
        }

        let mut attrs = Attributes::new();
        attrs
            .set("media", media)
            .set("type", mime_type)
            .set("sizes", size::join(sizes))
            .set("srcset", candidates.join(", "));
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
            .source(self.attrs.clone())
            .render_tag("source", &OMIT_IF_EMPTY)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Render for Source {
    fn render(&self) -> Markup {
        PreEscaped(Source::render(self))
    }
}
