//! Preview dispatcher decision.
//!
//! `/api/preview/{*path}` inspects the final path segment and either sends the
//! client to the HTML preview page or straight to the API route. The list
//! below is coarser than the previewable list in [`crate::content_type`] and is
//! kept separate on purpose.

use crate::error::ValidationError;
use crate::segment;

/// Extensions whose files are shown on the preview page instead of inline.
pub const SPECIAL_HANDLING_EXTENSIONS: &[&str] = &[
    // archives
    ".zip", ".tar.gz",
    // binaries
    ".exe", ".dll", ".so", ".bin",
    // office documents
    ".docx", ".xlsx", ".pptx",
];

/// Where the dispatcher redirects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchTarget {
    /// The HTML preview page, e.g. `/preview/release/a/b/v1/app.zip`.
    PreviewPage(String),
    /// The API route with `preview=true`, e.g. `/api/raw/a/b/main/x.md?preview=true`.
    Api(String),
}

impl DispatchTarget {
    pub fn location(&self) -> &str {
        match self {
            Self::PreviewPage(location) | Self::Api(location) => location,
        }
    }
}

/// Whether a file name ends in one of [`SPECIAL_HANDLING_EXTENSIONS`].
///
/// Matching is by suffix so that compound extensions like `.tar.gz` apply.
pub fn needs_special_handling(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    SPECIAL_HANDLING_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Decide the redirect for a dispatcher path (the part after `/api/preview/`).
///
/// `path` is decoded; the returned location is percent-encoded per segment.
pub fn dispatch(path: &str) -> Result<DispatchTarget, ValidationError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some(file_name) = segments.last() else {
        return Err(ValidationError::EmptyPath);
    };

    let joined = segment::encode_all(segments.as_slice());
    if needs_special_handling(file_name) {
        Ok(DispatchTarget::PreviewPage(format!("/preview/{joined}")))
    } else {
        Ok(DispatchTarget::Api(format!("/api/{joined}?preview=true")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binaries_go_to_preview_page() {
        assert_eq!(
            dispatch("release/a/b/v1/setup.exe").unwrap(),
            DispatchTarget::PreviewPage("/preview/release/a/b/v1/setup.exe".to_string())
        );
        assert!(matches!(
            dispatch("release/a/b/v1/Report.DOCX").unwrap(),
            DispatchTarget::PreviewPage(_)
        ));
    }

    #[test]
    fn compound_archive_extension_matches() {
        assert!(needs_special_handling("tool-linux.tar.gz"));
        assert!(!needs_special_handling("notes.gz"));
    }

    #[test]
    fn other_files_go_to_api() {
        let target = dispatch("raw/a/b/main/README.md").unwrap();
        assert_eq!(target.location(), "/api/raw/a/b/main/README.md?preview=true");
    }

    #[test]
    fn previewable_list_is_independent() {
        // Not previewable, yet not special either.
        assert!(matches!(
            dispatch("release/a/b/v1/data.csv").unwrap(),
            DispatchTarget::Api(_)
        ));
    }

    #[test]
    fn location_is_encoded_per_segment() {
        assert_eq!(
            dispatch("raw/a/b/main/a?b.md").unwrap().location(),
            "/api/raw/a/b/main/a%3Fb.md?preview=true"
        );
        assert_eq!(
            dispatch("raw/a/b/main/é.md").unwrap().location(),
            "/api/raw/a/b/main/%C3%A9.md?preview=true"
        );
        assert_eq!(
            dispatch("release/a/b/v1/my setup.exe").unwrap().location(),
            "/preview/release/a/b/v1/my%20setup.exe"
        );
    }

    #[test]
    fn empty_path_rejected() {
        assert_eq!(dispatch("").unwrap_err(), ValidationError::EmptyPath);
        assert_eq!(dispatch("//").unwrap_err(), ValidationError::EmptyPath);
    }
}
