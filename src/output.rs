//! CLI output formatting.
//!
//! Every command prints through a pure `format_*` function returning lines
//! (or a string), so the output is testable without capturing stdout. The
//! `print_*` wrappers only write those lines.
//!
//! # Output Format
//!
//! ## Sizes
//!
//! ```text
//! thumbnail - 150 x 150 (crop = 1)
//! medium - 300 x 300 (crop = 0)
//! medium_large - 768 x 0 (crop = 0)
//! large - 1024 x 1024 (crop = 0)
//! ```
//!
//! ## Resize
//!
//! ```text
//! {
//!   "url": "https://localhost/uploads/dawn-400x225.jpg",
//!   "width": 400,
//!   "height": 225
//! }
//! ```
//!
//! Markup from `img` and `picture` is printed verbatim.

use crate::config::{ImageSizeConfig, ImageSizes};
use crate::imaging::Resized;

/// `"{name} - {w} x {h} (crop = 0|1)"`.
pub fn image_size_line(size: &ImageSizeConfig) -> String {
    format!(
        "{} - {} x {} (crop = {})",
        size.name,
        size.width,
        size.height,
        u8::from(size.crop)
    )
}

pub fn format_image_sizes(sizes: &ImageSizes) -> Vec<String> {
    sizes.iter().map(image_size_line).collect()
}

pub fn print_image_sizes(sizes: &ImageSizes) {
    for line in format_image_sizes(sizes) {
        println!("{}", line);
    }
}

/// Registered sizes as a JSON array.
pub fn format_image_sizes_json(sizes: &ImageSizes) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(sizes)
}

pub fn format_resized(resized: &Resized) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(resized)
}
