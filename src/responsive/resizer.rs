//! A reusable resize request.
//!
//! The builders create one `Resizer` per call and mutate its width and
//! height for each variant they need.

use super::{Error, Result};
use crate::imaging::{ResizeEngine, ResizeRequest, Resized};
use crate::library::MediaLibrary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resizer {
    origin_url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    crop: bool,
    upscale: bool,
}

impl Default for Resizer {
    fn default() -> Self {
        Self {
            origin_url: None,
            width: None,
            height: None,
            crop: true,
            upscale: true,
        }
    }
}

impl Resizer {
    pub fn make_with_url(url: impl Into<String>) -> Self {
        Self {
            origin_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn make_by_attachment_id(library: &dyn MediaLibrary, id: u64) -> Result<Self> {
        let url = library
            .attachment_url(id)
            .ok_or_else(|| Error::InvalidInput(format!("attachment {id} has no URL")))?;
        Ok(Self::make_with_url(url))
    }

    /// Resizer for the featured image of a post.
    pub fn make_by_post_id(library: &dyn MediaLibrary, post_id: u64) -> Result<Self> {
        let id = library
            .post_thumbnail_id(post_id)
            .ok_or_else(|| Error::InvalidInput(format!("post {post_id} has no thumbnail")))?;
        Self::make_by_attachment_id(library, id)
    }

    pub fn set_origin_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.origin_url = Some(url.into());
        self
    }

    pub fn set_width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// `None` keeps the source aspect ratio.
    pub fn set_height(&mut self, height: Option<u32>) -> &mut Self {
        self.height = height;
        self
    }

    pub fn set_crop(&mut self, crop: bool) -> &mut Self {
        self.crop = crop;
        self
    }

    pub fn set_upscale(&mut self, upscale: bool) -> &mut Self {
        self.upscale = upscale;
        self
    }

    pub fn origin_url(&self) -> Option<&str> {
        self.origin_url.as_deref()
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn crop(&self) -> bool {
        self.crop
    }

    pub fn upscale(&self) -> bool {
        self.upscale
    }

    pub fn resize(&self, engine: &dyn ResizeEngine) -> Result<Resized> {
        let url = self
            .origin_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::InvalidInput("resize needs an origin URL".into()))?;
        let width = self
            .width
            .filter(|&w| w > 0)
            .ok_or_else(|| Error::InvalidInput("resize needs a non-zero width".into()))?;

        let resized = engine.resize(&ResizeRequest {
            url,
            width,
            height: self.height.filter(|&h| h > 0),
            crop: self.crop,
            upscale: self.upscale,
        })?;
        Ok(resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::JsonLibrary;
    use crate::test_helpers::{MockEngine, RecordedRequest};

    fn library() -> JsonLibrary {
        JsonLibrary::from_json(
            r#"{
                "attachments": [{"id": 3, "url": "https://h/up/a.jpg", "mime_type": "image/jpeg"}],
                "posts": [{"id": 9, "title": "T", "thumbnail_id": 3}, {"id": 10, "title": "U"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn defaults_crop_and_upscale() {
        let resizer = Resizer::make_with_url("https://h/up/a.jpg");
        assert!(resizer.crop());
        assert!(resizer.upscale());
        assert_eq!(resizer.width(), None);
        assert_eq!(resizer.height(), None);
    }

    #[test]
    fn fluent_setters() {
        let mut resizer = Resizer::default();
        resizer
            .set_origin_url("https://h/up/b.jpg")
            .set_width(400)
            .set_height(Some(300))
            .set_crop(false)
            .set_upscale(false);

        assert_eq!(resizer.origin_url(), Some("https://h/up/b.jpg"));
        assert_eq!((resizer.width(), resizer.height()), (Some(400), Some(300)));
        assert!(!resizer.crop() && !resizer.upscale());
    }

    #[test]
    fn resize_forwards_request_to_engine() {
        let engine = MockEngine::new();
        let mut resizer = Resizer::make_with_url("https://h/up/a.jpg");
        resizer.set_width(400).set_height(Some(225));

        let resized = resizer.resize(&engine).unwrap();
        assert_eq!(resized.url, "https://h/up/a-400x225.jpg");
        assert_eq!(
            engine.requests(),
            vec![RecordedRequest {
                url: "https://h/up/a.jpg".into(),
                width: 400,
                height: Some(225),
                crop: true,
                upscale: true,
            }]
        );
    }

    #[test]
    fn resize_without_url_or_width_is_invalid() {
        let engine = MockEngine::new();

        let mut no_url = Resizer::default();
        no_url.set_width(100);
        assert!(matches!(no_url.resize(&engine), Err(Error::InvalidInput(_))));

        let no_width = Resizer::make_with_url("https://h/up/a.jpg");
        assert!(matches!(no_width.resize(&engine), Err(Error::InvalidInput(_))));

        let mut zero_width = Resizer::make_with_url("https://h/up/a.jpg");
        zero_width.set_width(0);
        assert!(matches!(zero_width.resize(&engine), Err(Error::InvalidInput(_))));

        assert!(engine.requests().is_empty());
    }

    #[test]
    fn engine_failure_is_resize_failed() {
        let engine = MockEngine::failing();
        let mut resizer = Resizer::make_with_url("https://h/up/a.jpg");
        resizer.set_width(100);

        assert!(matches!(resizer.resize(&engine), Err(Error::ResizeFailed(_))));
    }

    #[test]
    fn by_attachment_and_post_id() {
        let lib = library();
        assert_eq!(
            Resizer::make_by_attachment_id(&lib, 3).unwrap().origin_url(),
            Some("https://h/up/a.jpg")
        );
        assert_eq!(
            Resizer::make_by_post_id(&lib, 9).unwrap().origin_url(),
            Some("https://h/up/a.jpg")
        );
        assert!(matches!(
            Resizer::make_by_attachment_id(&lib, 4),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Resizer::make_by_post_id(&lib, 10),
            Err(Error::InvalidInput(_))
        ));
    }
}
