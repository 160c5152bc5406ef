//! Top-level markup builders.
//!
//! [`Responsive`] turns an origin image and a list of `(media, width)` slots
//! into finished markup:
//!
//! ```text
//! origin + [(max-width: 600px)=400, 800] + 16/9 + 2x
//!   │
//!   ├─ img      → one <img> with srcset 400w, 800w, 800w, 1600w and
//!   │             sizes "(max-width: 600px) 400px, 800px"
//!   └─ picture  → one <source> per slot (1x, 2x) + fallback <img>
//! ```
//!
//! The `build_*` methods return [`Result`]. The string-returning methods are
//! the recovery boundary: any failure is logged with `tracing::warn!` and
//! produces an empty string, so a broken image never breaks the page around
//! it.

use crate::imaging::ResizeEngine;
use crate::library::MediaLibrary;
use crate::responsive::{
    AttrValue, Error, Filters, ImageInput, Img, Picture, Resizer, Result, Size, Source,
    SrcsetItem,
};
use crate::uploads::ImageProbe;
use crate::urls;
use std::str::FromStr;

const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Largest width or height a variant is planned at, 2x variants included.
pub const MAX_VARIANT_DIMENSION: u32 = 16_384;

/// One slot: a media condition (empty for the default) and its width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaWidth {
    pub media: String,
    pub width: u32,
}

impl FromStr for MediaWidth {
    type Err = Error;

    /// `"(max-width: 600px)=400"` or a bare `"800"`.
    fn from_str(s: &str) -> Result<Self> {
        let (media, width) = match s.rsplit_once('=') {
            Some((media, width)) => (media.trim(), width.trim()),
            None => ("", s.trim()),
        };
        let width = width
            .parse::<u32>()
            .map_err(|_| Error::InvalidInput(format!("invalid width in {s:?}")))?;
        Ok(Self {
            media: media.to_string(),
            width,
        })
    }
}

/// Ordered slots. Order is kept in `srcset`, `sizes` and the sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaWidths(Vec<MediaWidth>);

impl MediaWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, media: &str, width: u32) -> Self {
        self.0.push(MediaWidth {
            media: media.to_string(),
            width,
        });
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaWidth> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<MediaWidth>> for MediaWidths {
    fn from(entries: Vec<MediaWidth>) -> Self {
        Self(entries)
    }
}

impl<'a> FromIterator<(&'a str, u32)> for MediaWidths {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |widths, (media, width)| widths.push(media, width))
    }
}

/// Parse `"16/9"` or `"1.7778"`.
pub fn parse_aspect_ratio(s: &str) -> Result<f64> {
    let invalid = || Error::InvalidInput(format!("invalid aspect ratio {s:?}"));
    let ratio = match s.split_once('/') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|_| invalid())?;
            let h: f64 = h.trim().parse().map_err(|_| invalid())?;
            w / h
        }
        None => s.trim().parse().map_err(|_| invalid())?,
    };
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(invalid())
    }
}

/// Everything a single `img` / `picture` call needs besides the origin.
#[derive(Debug, Clone, Default)]
pub struct ResponsiveOptions {
    pub widths: MediaWidths,
    /// Add a double-density variant per slot.
    pub pixel_ratio_2x: bool,
    /// Width / height. Without it variants keep the source aspect ratio.
    pub aspect_ratio: Option<f64>,
    pub alt: String,
    pub lazy: bool,
    /// Extra attributes for the `<img>` (or the `<picture>` element).
    pub attrs: Vec<(String, AttrValue)>,
}

impl ResponsiveOptions {
    /// Width and aspect-derived height of one variant. Both must stay within
    /// [`MAX_VARIANT_DIMENSION`].
    fn variant_size(&self, width: u32) -> Result<(u32, Option<u32>)> {
        if width > MAX_VARIANT_DIMENSION {
            return Err(Error::InvalidInput(format!(
                "variant width {width} exceeds {MAX_VARIANT_DIMENSION}"
            )));
        }
        let ratio = self
            .aspect_ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0);
        let height = match ratio {
            Some(ratio) => {
                let height = (f64::from(width) / ratio).round();
                if !(1.0..=f64::from(MAX_VARIANT_DIMENSION)).contains(&height) {
                    return Err(Error::InvalidInput(format!(
                        "aspect ratio {ratio} gives a {width}x{height} variant"
                    )));
                }
                Some(height as u32)
            }
            None => None,
        };
        Ok((width, height))
    }
}

/// Markup builder bound to its collaborators.
pub struct Responsive<'a> {
    engine: &'a dyn ResizeEngine,
    probe: &'a dyn ImageProbe,
    library: Option<&'a dyn MediaLibrary>,
    filters: Filters,
    crop: bool,
    upscale: bool,
    https: bool,
}

impl<'a> Responsive<'a> {
    pub fn new(engine: &'a dyn ResizeEngine, probe: &'a dyn ImageProbe) -> Self {
        Self {
            engine,
            probe,
            library: None,
            filters: Filters::default(),
            crop: true,
            upscale: true,
            https: false,
        }
    }

    pub fn with_library(mut self, library: &'a dyn MediaLibrary) -> Self {
        self.library = Some(library);
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }

    pub fn with_upscale(mut self, upscale: bool) -> Self {
        self.upscale = upscale;
        self
    }

    /// Scheme given to protocol-relative URLs in [`resize_url`](Self::resize_url).
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    // =========================================================================
    // Fallible pipelines
    // =========================================================================

    pub fn build_img(&self, origin_url: &str, options: &ResponsiveOptions) -> Result<Img> {
        let mut resizer = self.resizer(origin_url);
        let mut srcset_items = Vec::new();
        let mut sizes = Vec::new();

        for entry in options.widths.iter() {
            let (width, height) = options.variant_size(entry.width)?;
            resizer.set_width(width).set_height(height);
            srcset_items.push(SrcsetItem::make_with_resize(
                &resizer,
                &format!("{}w", entry.width),
                self.engine,
            )?);

            if options.pixel_ratio_2x {
                let (double, double_height) = options.variant_size(double(entry.width)?)?;
                resizer.set_width(double).set_height(double_height);
                srcset_items.push(SrcsetItem::make_with_resize(
                    &resizer,
                    &format!("{double}w"),
                    self.engine,
                )?);
            }

            sizes.push(Size::make(entry.media.as_str(), format!("{}px", entry.width))?);
        }

        let alt = urls::strip_tags(&options.alt);
        let input = ImageInput {
            lazy: options.lazy,
            ..ImageInput::new(origin_url, &alt)
        };
        let mut img = Img::make(&input, &srcset_items, &sizes, self.probe)?;
        for (name, value) in &options.attrs {
            img.set_attr(name, value.clone());
        }
        Ok(img)
    }

    pub fn build_picture(&self, origin_url: &str, options: &ResponsiveOptions) -> Result<Picture> {
        let mut resizer = self.resizer(origin_url);
        let mut sources = Vec::new();

        for entry in options.widths.iter() {
            let (width, height) = options.variant_size(entry.width)?;
            resizer.set_width(width).set_height(height);
            let mut items = vec![SrcsetItem::make_with_resize(&resizer, "1x", self.engine)?];

            if options.pixel_ratio_2x {
                let (double, double_height) = options.variant_size(double(entry.width)?)?;
                resizer.set_width(double).set_height(double_height);
                items.push(SrcsetItem::make_with_resize(&resizer, "2x", self.engine)?);
            }

            sources.push(Source::make(&items, &[], &entry.media, "")?);
        }

        let alt = urls::strip_tags(&options.alt);
        let input = ImageInput {
            lazy: options.lazy,
            ..ImageInput::new(origin_url, &alt)
        };
        let mut picture = Picture::make(&input, sources, self.probe)?;
        for (name, value) in &options.attrs {
            picture.set_picture_attr(name, value.clone());
        }
        Ok(picture)
    }

    // =========================================================================
    // Never-failing entry points
    // =========================================================================

    pub fn img(&self, origin_url: &str, options: &ResponsiveOptions) -> String {
        match self.build_img(origin_url, options) {
            Ok(img) => img.render_with(&self.filters),
            Err(err) => {
                tracing::warn!(origin = origin_url, error = %err, "cannot build responsive <img>");
                String::new()
            }
        }
    }

    pub fn picture(&self, origin_url: &str, options: &ResponsiveOptions) -> String {
        match self.build_picture(origin_url, options) {
            Ok(picture) => picture.render_with(&self.filters),
            Err(err) => {
                tracing::warn!(origin = origin_url, error = %err, "cannot build responsive <picture>");
                String::new()
            }
        }
    }

    pub fn img_by_attachment_id(&self, id: u64, options: &ResponsiveOptions) -> String {
        match self.attachment_url(id) {
            Ok(url) => self.img(&url, options),
            Err(err) => {
                tracing::warn!(attachment = id, error = %err, "cannot resolve attachment");
                String::new()
            }
        }
    }

    pub fn picture_by_attachment_id(&self, id: u64, options: &ResponsiveOptions) -> String {
        match self.attachment_url(id) {
            Ok(url) => self.picture(&url, options),
            Err(err) => {
                tracing::warn!(attachment = id, error = %err, "cannot resolve attachment");
                String::new()
            }
        }
    }

    /// `<img>` of a post's featured image. The post title is the alt text
    /// unless `options.alt` is set.
    pub fn img_for_post(&self, post_id: u64, options: &ResponsiveOptions) -> String {
        match self.post_thumbnail(post_id, options) {
            Some((url, options)) => self.img(&url, &options),
            None => String::new(),
        }
    }

    /// `<picture>` of a post's featured image, see [`img_for_post`](Self::img_for_post).
    pub fn picture_for_post(&self, post_id: u64, options: &ResponsiveOptions) -> String {
        match self.post_thumbnail(post_id, options) {
            Some((url, options)) => self.picture(&url, &options),
            None => String::new(),
        }
    }

    /// URL of a single resized variant, or `url` itself when resizing fails.
    pub fn resize_url(
        &self,
        url: &str,
        width: u32,
        height: Option<u32>,
        crop: bool,
        upscale: bool,
    ) -> String {
        let url = urls::with_scheme(url, self.https);
        let mut resizer = Resizer::make_with_url(url.as_str());
        resizer
            .set_width(width)
            .set_height(height)
            .set_crop(crop)
            .set_upscale(upscale);

        match resizer.resize(self.engine) {
            Ok(resized) => resized.url,
            Err(err) => {
                tracing::warn!(origin = %url, width, error = %err, "resize failed, using original");
                url
            }
        }
    }

    pub fn is_svg_attachment(&self, id: u64) -> bool {
        self.library
            .and_then(|library| library.attachment_mime_type(id))
            .is_some_and(|mime| mime.eq_ignore_ascii_case(SVG_MIME_TYPE))
    }

    fn resizer(&self, origin_url: &str) -> Resizer {
        let mut resizer = Resizer::make_with_url(origin_url);
        resizer.set_crop(self.crop).set_upscale(self.upscale);
        resizer
    }

    fn library(&self) -> Result<&'a dyn MediaLibrary> {
        self.library
            .ok_or_else(|| Error::InvalidInput("no media library configured".into()))
    }

    fn attachment_url(&self, id: u64) -> Result<String> {
        let resizer = Resizer::make_by_attachment_id(self.library()?, id)?;
        Ok(resizer.origin_url().unwrap_or_default().to_string())
    }

    fn post_thumbnail(
        &self,
        post_id: u64,
        options: &ResponsiveOptions,
    ) -> Option<(String, ResponsiveOptions)> {
        if post_id == 0 {
            return None;
        }
        let library = self.library.or_else(|| {
            tracing::warn!(post = post_id, "no media library configured");
            None
        })?;
        let resizer = Resizer::make_by_post_id(library, post_id).ok()?;
        let url = resizer.origin_url()?.to_string();

        let mut options = options.clone();
        if options.alt.is_empty() {
            options.alt = library.post_title(post_id).unwrap_or_default();
        }
        Some((url, options))
    }
}

fn double(width: u32) -> Result<u32> {
    width
        .checked_mul(2)
        .ok_or_else(|| Error::InvalidInput(format!("width {width} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::JsonLibrary;
    use crate::test_helpers::{MockEngine, MockProbe};

    const ORIGIN: &str = "https://example.com/uploads/dawn.jpg";

    fn slots() -> MediaWidths {
        MediaWidths::new()
            .push("(max-width: 600px)", 400)
            .push("", 800)
    }

    fn library() -> JsonLibrary {
        JsonLibrary::from_json(
            r#"{
                "attachments": [
                    {"id": 7, "url": "https://example.com/uploads/dawn.jpg", "mime_type": "image/jpeg"},
                    {"id": 8, "url": "https://example.com/uploads/logo.svg", "mime_type": "image/svg+xml"}
                ],
                "posts": [
                    {"id": 42, "title": "Morning <em>light</em>", "thumbnail_id": 7},
                    {"id": 43, "title": "Text only"}
                ]
            }"#,
        )
        .unwrap()
    }

    // =========================================================================
    // Slot parsing
    // =========================================================================

    #[test]
    fn media_width_parses_both_forms() {
        assert_eq!(
            "(max-width: 600px)=400".parse::<MediaWidth>().unwrap(),
            MediaWidth {
                media: "(max-width: 600px)".into(),
                width: 400
            }
        );
        assert_eq!(
            "800".parse::<MediaWidth>().unwrap(),
            MediaWidth {
                media: String::new(),
                width: 800
            }
        );
        assert!("(min-width: 1px)=wide".parse::<MediaWidth>().is_err());
    }

    #[test]
    fn aspect_ratio_parses_fraction_and_decimal() {
        assert!((parse_aspect_ratio("16/9").unwrap() - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(parse_aspect_ratio("1.5").unwrap(), 1.5);
        assert!(parse_aspect_ratio("16/0").is_err());
        assert!(parse_aspect_ratio("-1").is_err());
        assert!(parse_aspect_ratio("wide").is_err());
    }

    // =========================================================================
    // img
    // =========================================================================

    #[test]
    fn img_with_aspect_ratio_and_retina() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(2000, 1125);
        let options = ResponsiveOptions {
            widths: slots(),
            pixel_ratio_2x: true,
            aspect_ratio: Some(16.0 / 9.0),
            ..Default::default()
        };

        let img = Responsive::new(&engine, &probe).build_img(ORIGIN, &options).unwrap();

        assert_eq!(
            engine.sizes(),
            vec![
                (400, Some(225)),
                (800, Some(450)),
                (800, Some(450)),
                (1600, Some(900)),
            ]
        );
        assert_eq!(
            img.attrs().get("srcset"),
            Some(&AttrValue::Text(
                "https://example.com/uploads/dawn-400x225.jpg 400w, \
                 https://example.com/uploads/dawn-800x450.jpg 800w, \
                 https://example.com/uploads/dawn-800x450.jpg 800w, \
                 https://example.com/uploads/dawn-1600x900.jpg 1600w"
                    .into()
            ))
        );
        assert_eq!(
            img.attrs().get("sizes"),
            Some(&AttrValue::Text("(max-width: 600px) 400px, 800px".into()))
        );
    }

    #[test]
    fn img_without_aspect_ratio_leaves_height_unset() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(2000, 1500);
        let options = ResponsiveOptions {
            widths: slots(),
            ..Default::default()
        };

        Responsive::new(&engine, &probe).build_img(ORIGIN, &options).unwrap();
        assert_eq!(engine.sizes(), vec![(400, None), (800, None)]);
    }

    #[test]
    fn img_renders_full_markup() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(2000, 1500);
        let options = ResponsiveOptions {
            widths: MediaWidths::new().push("", 400),
            alt: "<b>Dawn</b> at sea".into(),
            lazy: true,
            attrs: vec![
                ("class".into(), "hero".into()),
                ("src".into(), "ignored.jpg".into()),
            ],
            ..Default::default()
        };

        let html = Responsive::new(&engine, &probe).img(ORIGIN, &options);
        assert_eq!(
            html,
            concat!(
                r#"<img src="https://example.com/uploads/dawn.jpg" alt="Dawn at sea" loading="lazy" "#,
                r#"sizes="400px" width="2000" height="1500" "#,
                r#"srcset="https://example.com/uploads/dawn-400x300.jpg 400w" class="hero">"#
            )
        );
    }

    #[test]
    fn img_uses_configured_crop_and_upscale() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let options = ResponsiveOptions {
            widths: MediaWidths::new().push("", 400),
            ..Default::default()
        };

        Responsive::new(&engine, &probe)
            .with_crop(false)
            .with_upscale(false)
            .img(ORIGIN, &options);

        let request = &engine.requests()[0];
        assert!(!request.crop);
        assert!(!request.upscale);
    }

    #[test]
    fn img_applies_filters() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let filters = Filters::new().with_img(|a| a.with("decoding", "async"));

        let html = Responsive::new(&engine, &probe)
            .with_filters(filters)
            .img(ORIGIN, &ResponsiveOptions::default());
        assert!(html.ends_with(r#" decoding="async">"#));
    }

    #[test]
    fn svg_img_skips_engine_and_probe() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let options = ResponsiveOptions {
            widths: slots(),
            pixel_ratio_2x: true,
            ..Default::default()
        };

        let html = Responsive::new(&engine, &probe).img("https://example.com/uploads/logo.svg", &options);
        assert_eq!(
            html,
            r#"<img src="https://example.com/uploads/logo.svg" alt="" data-is_svg="1">"#
        );
        assert!(engine.requests().is_empty());
        assert_eq!(probe.call_count(), 0);
    }

    // =========================================================================
    // picture
    // =========================================================================

    #[test]
    fn picture_uses_density_descriptors() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(2000, 1125);
        let options = ResponsiveOptions {
            widths: slots(),
            pixel_ratio_2x: true,
            aspect_ratio: Some(16.0 / 9.0),
            alt: "Dawn".into(),
            attrs: vec![("class".into(), "hero".into())],
            ..Default::default()
        };

        let html = Responsive::new(&engine, &probe).picture(ORIGIN, &options);
        assert_eq!(
            html,
            "<picture class=\"hero\">\n\
             \t<source media=\"(max-width: 600px)\" srcset=\"https://example.com/uploads/dawn-400x225.jpg 1x, https://example.com/uploads/dawn-800x450.jpg 2x\">\n\
             \t<source srcset=\"https://example.com/uploads/dawn-800x450.jpg 1x, https://example.com/uploads/dawn-1600x900.jpg 2x\">\n\
             \t<img src=\"https://example.com/uploads/dawn.jpg\" alt=\"Dawn\" width=\"2000\" height=\"1125\">\n\
             </picture>"
        );
        assert_eq!(engine.requests().len(), 4);
    }

    #[test]
    fn svg_picture_has_no_sources() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let options = ResponsiveOptions {
            widths: slots(),
            ..Default::default()
        };

        let html = Responsive::new(&engine, &probe).picture("https://example.com/uploads/logo.svg", &options);
        assert!(!html.contains("<source"));
        assert!(html.contains(r#"data-is_svg="1""#));
    }

    // =========================================================================
    // Failure boundary
    // =========================================================================

    #[test]
    fn engine_failure_returns_empty_string() {
        let engine = MockEngine::failing();
        let probe = MockProbe::new(10, 10);
        let options = ResponsiveOptions {
            widths: slots(),
            ..Default::default()
        };
        let responsive = Responsive::new(&engine, &probe);

        assert_eq!(responsive.img(ORIGIN, &options), "");
        assert_eq!(responsive.picture(ORIGIN, &options), "");
        assert!(matches!(
            responsive.build_img(ORIGIN, &options),
            Err(Error::ResizeFailed(_))
        ));
    }

    #[test]
    fn probe_failure_returns_empty_string() {
        let engine = MockEngine::new();
        let probe = MockProbe::failing();
        assert_eq!(
            Responsive::new(&engine, &probe).img(ORIGIN, &ResponsiveOptions::default()),
            ""
        );
    }

    #[test]
    fn empty_origin_returns_empty_string() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let responsive = Responsive::new(&engine, &probe);
        assert_eq!(responsive.img("", &ResponsiveOptions::default()), "");
        assert!(matches!(
            responsive.build_picture("", &ResponsiveOptions::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_width_slot_fails() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let options = ResponsiveOptions {
            widths: MediaWidths::new().push("", 0),
            ..Default::default()
        };
        assert_eq!(Responsive::new(&engine, &probe).img(ORIGIN, &options), "");
    }

    #[test]
    fn extreme_aspect_ratio_fails_before_resizing() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let responsive = Responsive::new(&engine, &probe);
        for ratio in ["1/100000", "100000"] {
            let options = ResponsiveOptions {
                widths: MediaWidths::new().push("", 400),
                aspect_ratio: Some(parse_aspect_ratio(ratio).unwrap()),
                ..Default::default()
            };
            assert!(matches!(
                responsive.build_img(ORIGIN, &options),
                Err(Error::InvalidInput(_))
            ));
            assert_eq!(responsive.picture(ORIGIN, &options), "");
        }
        assert!(engine.requests().is_empty());
    }

    #[test]
    fn oversized_double_density_variant_fails() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let options = ResponsiveOptions {
            widths: MediaWidths::new().push("", MAX_VARIANT_DIMENSION),
            pixel_ratio_2x: true,
            ..Default::default()
        };

        let responsive = Responsive::new(&engine, &probe);
        assert!(matches!(
            responsive.build_img(ORIGIN, &options),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(responsive.img(ORIGIN, &options), "");

        let huge = ResponsiveOptions {
            widths: MediaWidths::new().push("", u32::MAX),
            ..Default::default()
        };
        assert!(responsive.build_img(ORIGIN, &huge).is_err());
    }

    // =========================================================================
    // Library-backed builders
    // =========================================================================

    #[test]
    fn img_by_attachment_id_resolves_url() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let lib = library();
        let responsive = Responsive::new(&engine, &probe).with_library(&lib);

        let html = responsive.img_by_attachment_id(7, &ResponsiveOptions::default());
        assert!(html.starts_with(r#"<img src="https://example.com/uploads/dawn.jpg""#));
        assert_eq!(responsive.img_by_attachment_id(99, &ResponsiveOptions::default()), "");
    }

    #[test]
    fn picture_by_attachment_id_resolves_url() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let lib = library();
        let responsive = Responsive::new(&engine, &probe).with_library(&lib);

        let html = responsive.picture_by_attachment_id(8, &ResponsiveOptions::default());
        assert!(html.contains(r#"src="https://example.com/uploads/logo.svg""#));
    }

    #[test]
    fn attachment_lookup_without_library_is_empty() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let responsive = Responsive::new(&engine, &probe);
        assert_eq!(responsive.img_by_attachment_id(7, &ResponsiveOptions::default()), "");
        assert_eq!(responsive.img_for_post(42, &ResponsiveOptions::default()), "");
    }

    #[test]
    fn img_for_post_uses_title_as_alt() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let lib = library();
        let responsive = Responsive::new(&engine, &probe).with_library(&lib);

        let html = responsive.img_for_post(42, &ResponsiveOptions::default());
        assert!(html.contains(r#"alt="Morning light""#));

        let options = ResponsiveOptions {
            alt: "Custom".into(),
            ..Default::default()
        };
        assert!(responsive.picture_for_post(42, &options).contains(r#"alt="Custom""#));
    }

    #[test]
    fn post_without_thumbnail_is_empty() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let lib = library();
        let responsive = Responsive::new(&engine, &probe).with_library(&lib);

        assert_eq!(responsive.img_for_post(0, &ResponsiveOptions::default()), "");
        assert_eq!(responsive.img_for_post(43, &ResponsiveOptions::default()), "");
        assert_eq!(responsive.picture_for_post(404, &ResponsiveOptions::default()), "");
    }

    #[test]
    fn svg_attachment_detection() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let lib = library();
        let responsive = Responsive::new(&engine, &probe).with_library(&lib);

        assert!(responsive.is_svg_attachment(8));
        assert!(!responsive.is_svg_attachment(7));
        assert!(!responsive.is_svg_attachment(99));
    }

    // =========================================================================
    // resize_url
    // =========================================================================

    #[test]
    fn resize_url_returns_variant() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let responsive = Responsive::new(&engine, &probe);

        assert_eq!(
            responsive.resize_url(ORIGIN, 300, Some(200), true, false),
            "https://example.com/uploads/dawn-300x200.jpg"
        );
        let request = &engine.requests()[0];
        assert!(request.crop && !request.upscale);
    }

    #[test]
    fn resize_url_adds_scheme_to_protocol_relative() {
        let engine = MockEngine::new();
        let probe = MockProbe::new(10, 10);
        let responsive = Responsive::new(&engine, &probe).with_https(true);

        responsive.resize_url("//example.com/uploads/dawn.jpg", 300, None, true, true);
        assert_eq!(engine.requests()[0].url, ORIGIN);
    }

    #[test]
    fn resize_url_falls_back_to_input() {
        let engine = MockEngine::failing();
        let probe = MockProbe::new(10, 10);
        let responsive = Responsive::new(&engine, &probe);

        assert_eq!(responsive.resize_url(ORIGIN, 300, None, true, true), ORIGIN);
        assert_eq!(
            responsive.resize_url("//example.com/uploads/dawn.jpg", 300, None, true, true),
            "http://example.com/uploads/dawn.jpg"
        );
    }
}
