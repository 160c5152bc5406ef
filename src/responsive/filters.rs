//! Attribute filters applied right before serialization.
//!
//! Each hook receives the attribute map of one element and returns the map
//! to render. Hooks that are not set are the identity. Filters are passed to
//! `render_with` explicitly; rendering never reads global state.
//!
//! ```
//! # use responsive_img::responsive::Filters;
//! let filters = Filters::new().with_img(|attrs| attrs.with("decoding", "async"));
//! ```

use super::attrs::Attributes;
use std::fmt;

type AttrFilter = Box<dyn Fn(Attributes) -> Attributes + Send + Sync>;

#[derive(Default)]
pub struct Filters {
    img: Option<AttrFilter>,
    picture: Option<AttrFilter>,
    picture_img: Option<AttrFilter>,
    source: Option<AttrFilter>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook for a standalone `<img>`.
    pub fn with_img(
        mut self,
        filter: impl Fn(Attributes) -> Attributes + Send + Sync + 'static,
    ) -> Self {
        self.img = Some(Box::new(filter));
        self
    }

    /// Hook for the `<picture>` element itself.
    pub fn with_picture(
        mut self,
        filter: impl Fn(Attributes) -> Attributes + Send + Sync + 'static,
    ) -> Self {
        self.picture = Some(Box::new(filter));
        self
    }

    /// Hook for the fallback `<img>` inside a `<picture>`.
    pub fn with_picture_img(
        mut self,
        filter: impl Fn(Attributes) -> Attributes + Send + Sync + 'static,
    ) -> Self {
        self.picture_img = Some(Box::new(filter));
        self
    }

    /// Hook for every `<source>`.
    pub fn with_source(
        mut self,
        filter: impl Fn(Attributes) -> Attributes + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(filter));
        self
    }

    pub fn img(&self, attrs: Attributes) -> Attributes {
        apply(&self.img, attrs)
    }

    pub fn picture(&self, attrs: Attributes) -> Attributes {
        apply(&self.picture, attrs)
    }

    pub fn picture_img(&self, attrs: Attributes) -> Attributes {
        apply(&self.picture_img, attrs)
    }

    pub fn source(&self, attrs: Attributes) -> Attributes {
        apply(&self.source, attrs)
    }
}

fn apply(filter: &Option<AttrFilter>, attrs: Attributes) -> Attributes {
    match filter {
        Some(f) => f(attrs),
        None => attrs,
    }
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filters")
            .field("img", &self.img.is_some())
            .field("picture", &self.picture.is_some())
            .field("picture_img", &self.picture_img.is_some())
            .field("source", &self.source.is_some())
            .finish()
    }
}
