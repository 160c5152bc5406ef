//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::ResizeMode;

/// Outcome of planning a resize request against the source dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    /// The source already satisfies the request; serve it unchanged.
    Original,
    /// Produce a new variant with these exact dimensions.
    Resize {
        width: u32,
        height: u32,
        mode: ResizeMode,
    },
    /// Cropping to the requested box would require enlarging the source,
    /// and upscaling is disabled.
    TooSmall,
}

/// Decide which variant a request maps to.
///
/// # Arguments
/// * `original` - Source image dimensions
/// * `width` - Requested width (non-zero)
/// * `height` - Requested height; `None` preserves the source aspect ratio
/// * `crop` - Crop to fill the exact box (center anchor) instead of scaling to fit
/// * `upscale` - Allow results larger than the source
///
/// # Examples
/// ```
/// # use responsive_img::imaging::{plan_resize, Dimensions, ResizeMode, ResizePlan};
/// let source = Dimensions::new(2000, 1500);
/// assert_eq!(
///     plan_resize(source, 800, Some(450), true, true),
///     ResizePlan::Resize { width: 800, height: 450, mode: ResizeMode::Fill }
/// );
/// assert_eq!(
///     plan_resize(source, 800, None, true, true),
///     ResizePlan::Resize { width: 800, height: 600, mode: ResizeMode::Fit }
/// );
/// ```
pub fn plan_resize(
    original: Dimensions,
    width: u32,
    height: Option<u32>,
    crop: bool,
    upscale: bool,
) -> ResizePlan {
    if original.width == 0 || original.height == 0 || width == 0 {
        return ResizePlan::TooSmall;
    }

    match height {
        Some(h) if crop && h > 0 => plan_fill(original, width, h, upscale),
        _ => plan_fit(original, width, height.filter(|&h| h > 0), upscale),
    }
}

fn plan_fill(original: Dimensions, width: u32, height: u32, upscale: bool) -> ResizePlan {
    if width == original.width && height == original.height {
        return ResizePlan::Original;
    }
    if !upscale && (width > original.width || height > original.height) {
        return ResizePlan::TooSmall;
    }
    ResizePlan::Resize {
        width,
        height,
        mode: ResizeMode::Fill,
    }
}

fn plan_fit(original: Dimensions, width: u32, height: Option<u32>, upscale: bool) -> ResizePlan {
    let scale_w = width as f64 / original.width as f64;
    let mut scale = match height {
        Some(h) => scale_w.min(h as f64 / original.height as f64),
        None => scale_w,
    };
    if !upscale {
        scale = scale.min(1.0);
    }

    let out_w = ((original.width as f64 * scale).round() as u32).max(1);
    let out_h = ((original.height as f64 * scale).round() as u32).max(1);

    if out_w == original.width && out_h == original.height {
        ResizePlan::Original
    } else {
        ResizePlan::Resize {
            width: out_w,
            height: out_h,
            mode: ResizeMode::Fit,
        }
    }
}

/// File name of a resized variant: `{stem}-{w}x{h}.{ext}`.
///
/// The name is derived only from the source name and the output size, so
/// repeated requests map to the same file.
pub fn variant_file_name(source_name: &str, width: u32, height: u32) -> String {
    match source_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{width}x{height}.{ext}"),
        _ => format!("{source_name}-{width}x{height}"),
    }
}
