//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! merged over stock defaults, so a config file only needs the keys it wants
//! to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [uploads]
//! base_dir = "uploads"                      # Local upload directory (relative to the config dir)
//! base_url = "https://localhost/uploads"    # Public URL base_dir is served from
//!
//! [resize]
//! crop = true                               # Crop to the exact box when a height is known
//! upscale = true                            # Allow variants larger than the source
//! quality = 90                              # JPEG quality (1-100)
//!
//! [[image_sizes]]                           # Registered sizes, listed by `sizes`
//! name = "thumbnail"
//! width = 150
//! height = 150
//! crop = true
//! ```
//!
//! Arrays are replaced, not merged: a config that declares `[[image_sizes]]`
//! replaces the whole stock list.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use crate::uploads::UploadDir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where uploads live on disk and where they are served from.
    pub uploads: UploadsConfig,
    /// Defaults for resize requests.
    pub resize: ResizeConfig,
    /// Named sizes registered for the site.
    pub image_sizes: ImageSizes,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize.quality == 0 || self.resize.quality > 100 {
            return Err(ConfigError::Validation(
                "resize.quality must be 1-100".into(),
            ));
        }
        if self.uploads.base_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "uploads.base_dir must not be empty".into(),
            ));
        }
        if self.uploads.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "uploads.base_url must not be empty".into(),
            ));
        }
        match Url::parse(self.uploads.base_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "uploads.base_url must be an absolute http(s) URL, got {:?}",
                    self.uploads.base_url
                )));
            }
        }
        let mut seen: Vec<&str> = Vec::new();
        for size in &self.image_sizes.0 {
            let name = size.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "image_sizes entries need a name".into(),
                ));
            }
            if seen.contains(&name) {
                return Err(ConfigError::Validation(format!(
                    "image size {name:?} is registered twice"
                )));
            }
            seen.push(name);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadsConfig {
    pub base_dir: String,
    pub base_url: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            base_dir: "uploads".to_string(),
            base_url: "https://localhost/uploads".to_string(),
        }
    }
}

impl UploadsConfig {
    /// Upload mapping with a relative `base_dir` resolved against `config_dir`.
    pub fn upload_dir(&self, config_dir: &Path) -> UploadDir {
        UploadDir::new(config_dir.join(&self.base_dir), self.base_url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub crop: bool,
    pub upscale: bool,
    pub quality: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            crop: true,
            upscale: true,
            quality: 90,
        }
    }
}

impl ResizeConfig {
    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }
}

/// One registered image size. A zero dimension is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSizeConfig {
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub crop: bool,
}

impl ImageSizeConfig {
    fn new(name: &str, width: u32, height: u32, crop: bool) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            crop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSizes(pub Vec<ImageSizeConfig>);

impl Default for ImageSizes {
    fn default() -> Self {
        Self(vec![
            ImageSizeConfig::new("thumbnail", 150, 150, true),
            ImageSizeConfig::new("medium", 300, 300, false),
            ImageSizeConfig::new("medium_large", 768, 0, false),
            ImageSizeConfig::new("large", 1024, 1024, false),
        ])
    }
}

impl ImageSizes {
    pub fn iter(&self) -> std::slice::Iter<'_, ImageSizeConfig> {
        self.0.iter()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# responsive-img configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Upload directory
# ---------------------------------------------------------------------------
[uploads]
# Local directory holding the original images and their resized variants.
# Relative paths are resolved against the directory containing this file.
base_dir = "uploads"

# Public URL the upload directory is served from. Only images under this URL
# can be measured or resized; other URLs are rejected as not local.
base_url = "https://localhost/uploads"

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[resize]
# When both width and height are requested, crop to exactly that box
# (center anchor). With crop = false the image is scaled to fit inside it.
crop = true

# Allow variants larger than the source image. Without upscaling a crop
# that needs a bigger source fails, and a fit never enlarges.
upscale = true

# JPEG encoding quality (1-100).
quality = 90

# ---------------------------------------------------------------------------
# Registered image sizes
# ---------------------------------------------------------------------------
# Listed by `responsive-img sizes`. A height of 0 means unconstrained.
# Declaring any [[image_sizes]] replaces the whole list below.

[[image_sizes]]
name = "thumbnail"
width = 150
height = 150
crop = true

[[image_sizes]]
name = "medium"
width = 300
height = 300
crop = false

[[image_sizes]]
name = "medium_large"
width = 768
height = 0
crop = false

[[image_sizes]]
name = "large"
width = 1024
height = 1024
crop = false
"##
}
