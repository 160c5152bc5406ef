//! # responsive-img
//!
//! Responsive `<img>` and `<picture>` markup for images in an upload
//! directory. Give it an image URL and a list of `(media, width)` slots and it
//! produces markup with resized variants, `srcset` / `sizes`, alt text, lazy
//! loading and aspect-ratio-derived dimensions.
//!
//! # Architecture
//!
//! ```text
//! builder::Responsive            img / picture / *_by_attachment_id / *_for_post
//!   │  catches every error, logs it, returns ""
//!   ▼
//! responsive::{Img, Picture, Source, SrcsetItem, Size}   validated value objects
//!   │  Resizer → ResizeEngine        Origin → ImageProbe
//!   ▼
//! imaging::LocalEngine           plan_resize + ImageBackend (image crate)
//!   │
//!   ▼
//! uploads::UploadDir             public URL ↔ local file
//! ```
//!
//! The engine, the probe and the media library are traits, so the markup
//! layer is tested against recording mocks and the pixel work against real
//! files in a temp directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`builder`] | Top-level builders, slot parsing, the never-fail boundary |
//! | [`responsive`] | `SrcsetItem`, `Size`, `Source`, `Img`, `Picture`, `Resizer`, attribute maps and filters |
//! | [`imaging`] | Dimension planning, the `image`-crate backend and the upload-directory resize engine |
//! | [`uploads`] | Mapping between public URLs and local files; dimension probing |
//! | [`library`] | Attachment and post lookups (JSON-backed) |
//! | [`config`] | `config.toml` loading, merging, validation and registered sizes |
//! | [`urls`] | URL path, extension and scheme helpers |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Errors Inside, Empty Strings Outside
//!
//! Every value object validates its input and returns a typed error. Only the
//! string-returning builder methods recover: they log the error with
//! `tracing::warn!` and return an empty string, so one broken image leaves a
//! gap instead of breaking the page.
//!
//! ## Deterministic Variant Names
//!
//! A variant is stored as `{stem}-{w}x{h}.{ext}` next to its source. The name
//! depends only on the source and the output size, so repeated renders reuse
//! existing files and produce byte-identical markup.
//!
//! ## Width Descriptors for `<img>`, Densities for `<picture>`
//!
//! A flat `<img>` lists every variant with a `Nw` descriptor and lets
//! `sizes` pick. A `<picture>` already selects by media condition per
//! `<source>`, so each source only offers `1x` and `2x`.

pub mod builder;
pub mod config;
pub mod imaging;
pub mod library;
pub mod output;
pub mod responsive;
pub mod uploads;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
