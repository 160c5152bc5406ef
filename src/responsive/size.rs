//! One `sizes` entry.

use super::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    media: String,
    slot_width: String,
}

impl Size {
    /// `media` may be empty for the default slot.
    pub fn make(media: impl Into<String>, slot_width: impl Into<String>) -> Result<Self> {
        let slot_width = slot_width.into();
        if slot_width.trim().is_empty() {
            return Err(Error::InvalidInput("sizes slot width is empty".into()));
        }
        Ok(Self {
            media: media.into(),
            slot_width,
        })
    }

    pub fn media(&self) -> &str {
        &self.media
    }

    pub fn slot_width(&self) -> &str {
        &self.slot_width
    }

    pub fn render(&self) -> String {
        if self.media.is_empty() {
            self.slot_width.clone()
        } else {
            format!("{} {}", self.media, self.slot_width)
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub(crate) fn join(sizes: &[Size]) -> String {
    sizes
        .iter()
        .map(Size::render)
        .collect::<Vec<_>>()
        .join(", ")
}
