//! Image processing: measuring uploads and producing resized variants.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → fill** | `resize_to_fill` (Lanczos3, center crop) |
//! | **Resize → fit** | `resize_exact` to planned dimensions (Lanczos3) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`ResizeEngine`] and the upload-directory [`LocalEngine`]

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{ResizePlan, plan_resize, variant_file_name};
pub use operations::{LocalEngine, ResizeEngine, ResizeError, ResizeRequest, Resized};
pub use params::{Quality, ResizeMode, ResizeParams};
pub use rust_backend::RustBackend;
