//! Preview page for a single accelerated resource.

use ghaccel_core::ResourceRequest;
use ghaccel_core::content_type;
use maud::{Markup, html};

use super::components::page_shell;

/// Text previews are cut at this many bytes.
pub const MAX_TEXT_PREVIEW_BYTES: usize = 512 * 1024;

/// What the preview area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBody {
    /// Escaped text content.
    Text { content: String, truncated: bool },
    /// `<img>` pointing at the API URL.
    Image,
    /// `<iframe>` pointing at the API URL.
    Pdf,
    /// Download only.
    Unsupported,
    /// Fetching the content failed.
    Error(String),
}

impl PreviewBody {
    /// Decode a text body, truncating on a char boundary.
    pub fn text(bytes: &[u8]) -> Self {
        let truncated = bytes.len() > MAX_TEXT_PREVIEW_BYTES;
        let slice = &bytes[..bytes.len().min(MAX_TEXT_PREVIEW_BYTES)];
        let mut content = String::from_utf8_lossy(slice).into_owned();
        if truncated {
            // A multi-byte char cut in half decodes to U+FFFD; drop it.
            while content.ends_with('\u{FFFD}') {
                content.pop();
            }
        }
        Self::Text { content, truncated }
    }
}

/// Render the preview page.
///
/// `github_url` links back to the upstream file.
pub fn render(
    request: &ResourceRequest,
    github_url: &str,
    body: &PreviewBody,
    site_name: &str,
) -> Markup {
    let file_name = request.file_name();
    let api_url = request.api_path();
    let download_url = format!("{api_url}?preview=false");

    let content = html! {
        div class="file-header" {
            div {
                h1 class="file-name" { (file_name) }
                p class="file-kind" { (request.kind().label()) }
            }
            div class="file-actions" {
                a class="button primary" href=(download_url) { "Download" }
                a class="button" href=(github_url) target="_blank" rel="noopener noreferrer" {
                    "View on GitHub"
                }
            }
        }
        div class="preview" {
            @match body {
                PreviewBody::Text { content, truncated } => {
                    pre { (content) }
                    @if *truncated {
                        p class="preview-note" {
                            "Preview truncated. Download the file to see all of it."
                        }
                    }
                }
                PreviewBody::Image => {
                    img src=(api_url) alt=(file_name);
                }
                PreviewBody::Pdf => {
                    iframe src=(api_url) title=(file_name) {}
                }
                PreviewBody::Unsupported => {
                    (unsupported_notice(file_name, &download_url))
                }
                PreviewBody::Error(message) => {
                    p class="preview-error" { (message) }
                }
            }
        }
    };

    page_shell(file_name, site_name, content)
}

fn unsupported_notice(file_name: &str, download_url: &str) -> Markup {
    let ext = content_type::extension(file_name);
    let shown = if ext.is_empty() {
        "unknown".to_string()
    } else {
        format!(".{ext}")
    };

    html! {
        div class="preview-empty" {
            p { "This file type (" (shown) ") cannot be previewed directly in the browser." }
            a class="button primary" href=(download_url) { "Download File" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghaccel_core::ResourceKind;

    fn request(kind: ResourceKind, path: &str) -> ResourceRequest {
        ResourceRequest::from_path(kind, "a", "b", "main", path).unwrap()
    }

    #[test]
    fn text_preview_is_escaped() {
        let req = request(ResourceKind::Raw, "index.html");
        let body = PreviewBody::text(b"<b>bold</b>");
        let html = render(&req, "https://example", &body, "Site").into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("/api/raw/a/b/main/index.html?preview=false"));
        assert!(html.contains("Raw File"));
    }

    #[test]
    fn text_preview_truncates_large_bodies() {
        let big = vec![b'a'; MAX_TEXT_PREVIEW_BYTES + 10];
        match PreviewBody::text(&big) {
            PreviewBody::Text { content, truncated } => {
                assert!(truncated);
                assert_eq!(content.len(), MAX_TEXT_PREVIEW_BYTES);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn truncation_drops_split_characters() {
        let mut big = vec![b'a'; MAX_TEXT_PREVIEW_BYTES - 1];
        big.extend_from_slice("é".as_bytes());
        match PreviewBody::text(&big) {
            PreviewBody::Text { content, truncated } => {
                assert!(truncated);
                assert!(!content.ends_with('\u{FFFD}'));
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn image_and_pdf_embed_api_url() {
        let img = render(
            &request(ResourceKind::Raw, "logo.png"),
            "https://example",
            &PreviewBody::Image,
            "Site",
        )
        .into_string();
        assert!(img.contains(r#"<img src="/api/raw/a/b/main/logo.png""#));

        let pdf = render(
            &request(ResourceKind::Release, "manual.pdf"),
            "https://example",
            &PreviewBody::Pdf,
            "Site",
        )
        .into_string();
        assert!(pdf.contains(r#"<iframe src="/api/release/a/b/main/manual.pdf""#));
    }

    #[test]
    fn unsupported_names_the_extension() {
        let html = render(
            &request(ResourceKind::Release, "setup.exe"),
            "https://example",
            &PreviewBody::Unsupported,
            "Site",
        )
        .into_string();
        assert!(html.contains("This file type (.exe) cannot be previewed"));
        assert!(html.contains("Download File"));
    }
}
