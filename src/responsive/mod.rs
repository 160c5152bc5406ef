//! Value objects for responsive image markup.
//!
//! Leaf to root:
//!
//! | Type | Element |
//! |---|---|
//! | [`SrcsetItem`] | one `srcset` candidate, `url 400w` or `url 2x` |
//! | [`Size`] | one `sizes` entry, `(max-width: 600px) 400px` |
//! | [`Source`] | `<source media type sizes srcset>` |
//! | [`Img`] | `<img src alt … srcset>` |
//! | [`Picture`] | `<picture>` with sources and a fallback `<img>` |
//!
//! [`Resizer`] carries one resize request to the engine. [`Origin`] decides
//! between raster and vector handling, [`Attributes`] holds the ordered
//! attribute maps and [`Filters`] transforms them at render time.
//!
//! Every constructor validates its input and returns [`Error`]. Recovery
//! happens one level up, in [`builder`](crate::builder).

mod attrs;
mod filters;
mod img;
mod origin;
mod picture;
mod resizer;
mod size;
mod source;
mod srcset_item;

pub use attrs::{AttrValue, Attributes, PROTECTED};
pub use filters::Filters;
pub use img::{ImageInput, Img};
pub use origin::{Origin, VECTOR_MARKER};
pub use picture::Picture;
pub use resizer::Resizer;
pub use size::Size;
pub use source::Source;
pub use srcset_item::SrcsetItem;

use crate::imaging::ResizeError;
use crate::uploads::AttachmentError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("image file not found: {0}")]
    NotFound(PathBuf),
    #[error("not a readable image: {0}")]
    InvalidFormat(String),
    #[error("not a local upload: {0}")]
    NotLocal(String),
    #[error("resize failed: {0}")]
    ResizeFailed(#[from] ResizeError),
}

impl From<AttachmentError> for Error {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::EmptyUrl => Error::InvalidInput("empty image URL".into()),
            AttachmentError::NotLocal(url) => Error::NotLocal(url),
            AttachmentError::NotFound(path) => Error::NotFound(path),
            AttachmentError::InvalidFormat(msg) => Error::InvalidFormat(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
