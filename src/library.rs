//! Media library lookups.
//!
//! The markup builders can start from a numeric attachment id or from a post
//! whose featured image should be shown. [`MediaLibrary`] is the read-only
//! view of the content store they need; [`JsonLibrary`] is a file-backed
//! implementation for the CLI and tests.
//!
//! ## File format
//!
//! ```json
//! {
//!   "attachments": [
//!     { "id": 7, "url": "https://example.com/uploads/dawn.jpg", "mime_type": "image/jpeg" }
//!   ],
//!   "posts": [
//!     { "id": 42, "title": "Morning <em>light</em>", "thumbnail_id": 7 }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid library file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },
}

/// Read-only access to attachments and posts.
pub trait MediaLibrary {
    fn attachment_url(&self, id: u64) -> Option<String>;
    fn attachment_mime_type(&self, id: u64) -> Option<String>;
    fn post_thumbnail_id(&self, post_id: u64) -> Option<u64>;
    fn post_title(&self, post_id: u64) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LibraryFile {
    attachments: Vec<Attachment>,
    posts: Vec<Post>,
}

/// In-memory library loaded from a JSON document.
#[derive(Debug, Default)]
pub struct JsonLibrary {
    attachments: HashMap<u64, Attachment>,
    posts: HashMap<u64, Post>,
}

impl JsonLibrary {
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, LibraryError> {
        let file: LibraryFile = serde_json::from_str(content)?;
        Self::from_parts(file.attachments, file.posts)
    }

    pub fn from_parts(attachments: Vec<Attachment>, posts: Vec<Post>) -> Result<Self, LibraryError> {
        let mut library = Self::default();
        for attachment in attachments {
            let id = attachment.id;
            if library.attachments.insert(id, attachment).is_some() {
                return Err(LibraryError::DuplicateId {
                    kind: "attachment",
                    id,
                });
            }
        }
        for post in posts {
            let id = post.id;
            if library.posts.insert(id, post).is_some() {
                return Err(LibraryError::DuplicateId { kind: "post", id });
            }
        }
        Ok(library)
    }
}

impl MediaLibrary for JsonLibrary {
    fn attachment_url(&self, id: u64) -> Option<String> {
        self.attachments
            .get(&id)
            .map(|a| a.url.clone())
            .filter(|url| !url.is_empty())
    }

    fn attachment_mime_type(&self, id: u64) -> Option<String> {
        self.attachments
            .get(&id)
            .map(|a| a.mime_type.clone())
            .filter(|mime| !mime.is_empty())
    }

    fn post_thumbnail_id(&self, post_id: u64) -> Option<u64> {
        self.posts
            .get(&post_id)
            .and_then(|p| p.thumbnail_id)
            .filter(|&id| id != 0)
    }

    fn post_title(&self, post_id: u64) -> Option<String> {
        self.posts.get(&post_id).map(|p| p.title.clone())
    }
}
