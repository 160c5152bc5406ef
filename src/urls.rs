//! URL helpers shared by the value objects, the upload mapping and the engine.
//!
//! URLs handled here are the public addresses of files in the upload
//! directory: absolute (`https://host/uploads/a.jpg`), protocol-relative
//! (`//host/uploads/a.jpg`) or root-relative (`/uploads/a.jpg`). All three are
//! parsed with [`url::Url`]; the relative forms are joined onto a placeholder
//! origin and written back in their original form.

use url::{Position, Url};

const PLACEHOLDER_HTTP: &str = "http://localhost/";
const PLACEHOLDER_HTTPS: &str = "https://localhost/";

/// How a URL string names its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlForm {
    /// `scheme://host/path`
    Absolute,
    /// `//host/path`
    ProtocolRelative,
    /// `/path` (or a bare relative path)
    RootRelative,
}

impl UrlForm {
    pub fn of(url: &str) -> Self {
        let url = url.trim();
        if Url::parse(url).is_ok() {
            UrlForm::Absolute
        } else if url.starts_with("//") {
            UrlForm::ProtocolRelative
        } else {
            UrlForm::RootRelative
        }
    }
}

/// Parse any of the accepted URL forms.
///
/// Protocol-relative URLs get `https` or `http` depending on the flag;
/// root-relative ones are placed on a placeholder `localhost` origin, so only
/// their path is meaningful. Dot segments are normalized.
///
/// ```
/// # use responsive_img::urls::resolve;
/// let url = resolve("//Example.com/up/./a.jpg", true).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/up/a.jpg");
/// ```
pub fn resolve(url: &str, https: bool) -> Option<Url> {
    let base = Url::parse(if https {
        PLACEHOLDER_HTTPS
    } else {
        PLACEHOLDER_HTTP
    })
    .ok()?;
    base.join(url.trim()).ok()
}

/// Write `url` back in the given form.
fn render_as(url: &Url, form: UrlForm) -> String {
    match form {
        UrlForm::Absolute => url.to_string(),
        UrlForm::ProtocolRelative => format!("//{}", &url[Position::BeforeUsername..]),
        UrlForm::RootRelative => url[Position::BeforePath..].to_string(),
    }
}

/// Path component of a URL: scheme, authority, query and fragment removed.
///
/// ```
/// # use responsive_img::urls::url_path;
/// assert_eq!(url_path("https://example.com/up/a.jpg?v=2"), "/up/a.jpg");
/// assert_eq!(url_path("//cdn.example.com/a.svg#icon"), "/a.svg");
/// assert_eq!(url_path("/up/b.png"), "/up/b.png");
/// ```
pub fn url_path(url: &str) -> String {
    if url.trim().is_empty() {
        return String::new();
    }
    resolve(url, false)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_default()
}

/// Last path segment of a URL, still percent-encoded.
pub fn file_name(url: &str) -> String {
    url_path(url)
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Lower-cased extension of the last path segment, if any.
pub fn extension(url: &str) -> Option<String> {
    let file_name = file_name(url);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether the URL points at an SVG file, judged by its path extension.
pub fn is_svg_url(url: &str) -> bool {
    extension(url).is_some_and(|ext| ext == "svg")
}

/// Replace the last path segment of `url` with `file_name`.
///
/// Query and fragment are dropped: resized variants are plain files. The
/// result keeps the form (absolute, protocol-relative, root-relative) of the
/// input.
pub fn replace_file_name(url: &str, file_name: &str) -> String {
    let Some(mut parsed) = resolve(url, false) else {
        return file_name.to_string();
    };
    let directory = match parsed.path().rsplit_once('/') {
        Some((directory, _)) => directory.to_string(),
        None => String::new(),
    };
    parsed.set_path(&format!("{directory}/{file_name}"));
    parsed.set_query(None);
    parsed.set_fragment(None);
    render_as(&parsed, UrlForm::of(url))
}

/// Give a protocol-relative URL an explicit scheme. Other URLs pass through.
pub fn with_scheme(url: &str, https: bool) -> String {
    if UrlForm::of(url) != UrlForm::ProtocolRelative {
        return url.to_string();
    }
    resolve(url, https)
        .map(|parsed| parsed.to_string())
        .unwrap_or_else(|| url.to_string())
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
pub fn strip_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}
