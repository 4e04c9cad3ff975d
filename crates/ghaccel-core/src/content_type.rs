//! Extension to content-type resolution.
//!
//! Two independent tables live here. [`CONTENT_TYPES`] maps an extension to
//! the MIME type sent downstream, and [`PREVIEWABLE_EXTENSIONS`] decides
//! whether the preview page can render a file in the browser. An extension
//! may appear in one table and not the other (`.yml` is previewable but is
//! served as `application/octet-stream`).

/// MIME type used when an extension is missing or unknown.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension (lowercase, without the dot) to MIME type.
pub const CONTENT_TYPES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("jsx", "application/javascript"),
    ("ts", "application/typescript"),
    ("tsx", "application/typescript"),
    ("css", "text/css"),
    ("html", "text/html"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("txt", "text/plain"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
];

/// Text, image and PDF extensions the preview page can show inline.
pub const PREVIEWABLE_EXTENSIONS: &[&str] = &[
    // text
    "txt", "md", "js", "jsx", "ts", "tsx", "html", "css", "json", "yml", "yaml", "xml", "ini",
    // images
    "png", "jpg", "jpeg", "gif", "svg", "webp",
    // documents
    "pdf",
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Result of resolving a path against the content-type tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentInfo {
    /// MIME type to advertise.
    pub mime_type: &'static str,
    /// Whether the preview page can render this file.
    pub previewable: bool,
}

/// How the preview page should present a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Fetched and shown as escaped text.
    Text,
    /// Embedded with an `<img>` tag.
    Image,
    /// Embedded with an `<iframe>`.
    Pdf,
    /// Download only.
    Unsupported,
}

/// Lowercased extension of the final path segment, without the dot.
///
/// Returns an empty string when the segment has no `.`.
pub fn extension(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) => file_name[idx + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Resolve a path to its MIME type and previewability. Total for any input.
pub fn resolve(path: &str) -> ContentInfo {
    let ext = extension(path);
    let mime_type = CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_CONTENT_TYPE);

    ContentInfo {
        mime_type,
        previewable: !ext.is_empty() && PREVIEWABLE_EXTENSIONS.contains(&ext.as_str()),
    }
}

/// Classify a path for the preview page.
pub fn preview_kind(path: &str) -> PreviewKind {
    let ext = extension(path);
    if ext.is_empty() || !PREVIEWABLE_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Unsupported
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        PreviewKind::Image
    } else if ext == "pdf" {
        PreviewKind::Pdf
    } else {
        PreviewKind::Text
    }
}
