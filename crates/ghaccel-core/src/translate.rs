//! Translation between accelerator requests and GitHub URLs.
//!
//! Forward: [`to_upstream`] maps a [`ResourceRequest`] to exactly one upstream
//! URL. Reverse: [`from_pasted_url`] recognizes GitHub raw, blob and release
//! download links and maps them back to a request, which renders as an
//! accelerated URL. Archive links are only produced by the forward direction.

use std::str::FromStr;

use crate::content_type;
use crate::error::ValidationError;
use crate::request::{ResourceKind, ResourceRequest};
use crate::segment;

/// Default upstream for releases and archives.
pub const GITHUB_URL: &str = "https://github.com";

/// Default upstream for raw files.
pub const RAW_URL: &str = "https://raw.githubusercontent.com";

const GITHUB_HOST: &str = "github.com";
const RAW_HOST: &str = "raw.githubusercontent.com";

/// Base URLs of the two upstream hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamHosts {
    /// Serves release downloads and archives.
    pub github: String,
    /// Serves raw file contents.
    pub raw: String,
}

impl Default for UpstreamHosts {
    fn default() -> Self {
        Self {
            github: GITHUB_URL.to_string(),
            raw: RAW_URL.to_string(),
        }
    }
}

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Extension appended to the ref in the upstream URL.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Zip => "application/zip",
            Self::TarGz => "application/gzip",
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zip" => Ok(Self::Zip),
            "tar.gz" => Ok(Self::TarGz),
            other => Err(ValidationError::InvalidFormat(other.to_string())),
        }
    }
}

/// Resolved upstream resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    /// Kind of the originating request.
    pub kind: ResourceKind,
    /// Absolute upstream URL.
    pub url: String,
    /// Content type fixed by the accelerator. `None` means "use whatever
    /// upstream reports".
    pub expected_content_type: Option<&'static str>,
}

/// Map a request to its upstream URL.
///
/// Archive formats are validated here, before any network access. Owner,
/// repo, ref and every path segment are percent-encoded individually.
pub fn to_upstream(
    request: &ResourceRequest,
    hosts: &UpstreamHosts,
) -> Result<UpstreamTarget, ValidationError> {
    let owner = segment::encode(request.owner());
    let repo = segment::encode(request.repo());
    let reference = segment::encode(request.ref_or_tag());
    let github = hosts.github.trim_end_matches('/');

    let (url, expected_content_type) = match request.kind() {
        ResourceKind::Release => (
            format!(
                "{github}/{owner}/{repo}/releases/download/{reference}/{}",
                segment::encode_all(request.path_segments())
            ),
            None,
        ),
        ResourceKind::Archive => {
            let format: ArchiveFormat = request.path().parse()?;
            (
                format!(
                    "{github}/{owner}/{repo}/archive/refs/heads/{reference}.{}",
                    format.extension()
                ),
                Some(format.content_type()),
            )
        }
        ResourceKind::Raw => {
            let raw = hosts.raw.trim_end_matches('/');
            let mime = content_type::resolve(request.file_name()).mime_type;
            (
                format!(
                    "{raw}/{owner}/{repo}/{reference}/{}",
                    segment::encode_all(request.path_segments())
                ),
                Some(mime),
            )
        }
    };

    Ok(UpstreamTarget {
        kind: request.kind(),
        url,
        expected_content_type,
    })
}

/// Outcome of recognizing a pasted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastedUrl {
    /// A supported GitHub link, translated to an accelerator request.
    Recognized(ResourceRequest),
    /// A well-formed URL that is not a supported GitHub link.
    Unrecognized,
    /// Not a URL at all.
    Malformed(String),
}

impl PastedUrl {
    /// Returns the translated request, if any.
    pub fn request(self) -> Option<ResourceRequest> {
        match self {
            Self::Recognized(request) => Some(request),
            _ => None,
        }
    }
}

/// Recognize a pasted GitHub URL.
///
/// Patterns are tried in a fixed order and the first match wins:
///
/// 1. `https://raw.githubusercontent.com/{owner}/{repo}/{ref}/{path}` → raw
/// 2. `https://github.com/{owner}/{repo}/blob/{ref}/{path}` → raw
/// 3. `https://github.com/{owner}/{repo}/releases/download/{tag}/{file}` → release
///
/// Query strings and fragments are not part of the match. Segments are
/// percent-decoded; a segment that is not valid UTF-8 once decoded, or that
/// decodes to something containing `/`, makes the link unrecognized.
pub fn from_pasted_url(input: &str) -> PastedUrl {
    let parsed = match url::Url::parse(input.trim()) {
        Ok(url) => url,
        Err(e) => return PastedUrl::Malformed(e.to_string()),
    };

    if parsed.scheme() != "https" {
        return PastedUrl::Unrecognized;
    }
    let Some(host) = parsed.host_str() else {
        return PastedUrl::Unrecognized;
    };
    let path = parsed.path().trim_start_matches('/');

    let recognized = match_raw_content(host, path)
        .or_else(|| match_blob(host, path))
        .or_else(|| match_release_download(host, path));

    match recognized {
        Some(request) => PastedUrl::Recognized(request),
        None => PastedUrl::Unrecognized,
    }
}

/// Split `path` into `N` non-empty leading segments and a non-empty remainder.
fn split_fixed<const N: usize>(path: &str) -> Option<([&str; N], &str)> {
    let mut parts = path.splitn(N + 1, '/');
    let mut fixed = [""; N];
    for slot in fixed.iter_mut() {
        let segment = parts.next().filter(|s| !s.is_empty())?;
        *slot = segment;
    }
    let rest = parts.next().filter(|s| !s.is_empty())?;
    Some((fixed, rest))
}

/// Decode the matched pieces and build the request.
fn recognize(
    kind: ResourceKind,
    owner: &str,
    repo: &str,
    reference: &str,
    rest: &str,
) -> Option<ResourceRequest> {
    let path_segments = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(segment::decode)
        .collect::<Option<Vec<_>>>()?;
    ResourceRequest::new(
        kind,
        segment::decode(owner)?,
        segment::decode(repo)?,
        segment::decode(reference)?,
        path_segments,
    )
    .ok()
}

fn match_raw_content(host: &str, path: &str) -> Option<ResourceRequest> {
    if host != RAW_HOST {
        return None;
    }
    let ([owner, repo, reference], rest) = split_fixed::<3>(path)?;
    recognize(ResourceKind::Raw, owner, repo, reference, rest)
}

fn match_blob(host: &str, path: &str) -> Option<ResourceRequest> {
    if host != GITHUB_HOST {
        return None;
    }
    let ([owner, repo, "blob", reference], rest) = split_fixed::<4>(path)? else {
        return None;
    };
    recognize(ResourceKind::Raw, owner, repo, reference, rest)
}

fn match_release_download(host: &str, path: &str) -> Option<ResourceRequest> {
    if host != GITHUB_HOST {
        return None;
    }
    let ([owner, repo, "releases", "download", tag], rest) = split_fixed::<5>(path)? else {
        return None;
    };
    recognize(ResourceKind::Release, owner, repo, tag, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://proxy.example.com";

    fn request(kind: ResourceKind, reference: &str, path: &str) -> ResourceRequest {
        ResourceRequest::from_path(kind, "a", "b", reference, path).unwrap()
    }

    fn accelerated(input: &str) -> Option<String> {
        from_pasted_url(input)
            .request()
            .map(|r| r.accelerated_url(BASE))
    }

    #[test]
    fn release_upstream_url() {
        let target = to_upstream(
            &request(ResourceKind::Release, "v1.0", "app-linux.tar.gz"),
            &UpstreamHosts::default(),
        )
        .unwrap();
        assert_eq!(
            target.url,
            "https://github.com/a/b/releases/download/v1.0/app-linux.tar.gz"
        );
        assert_eq!(target.expected_content_type, None);
        assert_eq!(target.kind, ResourceKind::Release);
    }

    #[test]
    fn archive_upstream_url() {
        let hosts = UpstreamHosts::default();
        let zip = to_upstream(&request(ResourceKind::Archive, "main", "zip"), &hosts).unwrap();
        assert!(zip.url.ends_with("main.zip"));
        assert_eq!(zip.url, "https://github.com/a/b/archive/refs/heads/main.zip");
        assert_eq!(zip.expected_content_type, Some("application/zip"));

        let tgz = to_upstream(&request(ResourceKind::Archive, "dev", "tar.gz"), &hosts).unwrap();
        assert_eq!(tgz.url, "https://github.com/a/b/archive/refs/heads/dev.tar.gz");
        assert_eq!(tgz.expected_content_type, Some("application/gzip"));
    }

    #[test]
    fn archive_rejects_unknown_format() {
        let err = to_upstream(
            &request(ResourceKind::Archive, "main", "exe"),
            &UpstreamHosts::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidFormat("exe".to_string()));
    }

    #[test]
    fn raw_upstream_url_and_content_type() {
        let target = to_upstream(
            &request(ResourceKind::Raw, "main", "docs/guide.md"),
            &UpstreamHosts::default(),
        )
        .unwrap();
        assert_eq!(
            target.url,
            "https://raw.githubusercontent.com/a/b/main/docs/guide.md"
        );
        assert_eq!(target.expected_content_type, Some("text/markdown"));
    }

    #[test]
    fn custom_hosts_are_respected() {
        let hosts = UpstreamHosts {
            github: "http://127.0.0.1:9000/".to_string(),
            raw: "http://127.0.0.1:9001".to_string(),
        };
        let release = to_upstream(&request(ResourceKind::Release, "v1", "x.bin"), &hosts).unwrap();
        assert_eq!(
            release.url,
            "http://127.0.0.1:9000/a/b/releases/download/v1/x.bin"
        );
        let raw = to_upstream(&request(ResourceKind::Raw, "main", "x.txt"), &hosts).unwrap();
        assert_eq!(raw.url, "http://127.0.0.1:9001/a/b/main/x.txt");
    }

    #[test]
    fn pasted_raw_content_url() {
        assert_eq!(
            accelerated("https://raw.githubusercontent.com/a/b/main/README.md").as_deref(),
            Some("https://proxy.example.com/api/raw/a/b/main/README.md")
        );
    }

    #[test]
    fn pasted_blob_url_matches_raw_shape() {
        let from_blob = accelerated("https://github.com/a/b/blob/main/x.js");
        let from_raw = accelerated("https://raw.githubusercontent.com/a/b/main/x.js");
        assert_eq!(from_blob, from_raw);
        assert_eq!(
            from_blob.as_deref(),
            Some("https://proxy.example.com/api/raw/a/b/main/x.js")
        );
    }

    #[test]
    fn pasted_release_url() {
        assert_eq!(
            accelerated("https://github.com/a/b/releases/download/v1/app.zip").as_deref(),
            Some("https://proxy.example.com/api/release/a/b/v1/app.zip")
        );
    }

    #[test]
    fn pasted_nested_path_is_preserved() {
        assert_eq!(
            accelerated("https://github.com/a/b/blob/main/src/bin/tool.rs").as_deref(),
            Some("https://proxy.example.com/api/raw/a/b/main/src/bin/tool.rs")
        );
    }

    #[test]
    fn non_github_url_is_unrecognized() {
        assert_eq!(
            from_pasted_url("https://example.com/not-github"),
            PastedUrl::Unrecognized
        );
    }

    #[test]
    fn archive_links_are_not_recognized() {
        assert_eq!(
            from_pasted_url("https://github.com/a/b/archive/refs/heads/main.zip"),
            PastedUrl::Unrecognized
        );
    }

    #[test]
    fn incomplete_and_insecure_links_are_unrecognized() {
        assert_eq!(
            from_pasted_url("https://github.com/a/b/blob/main"),
            PastedUrl::Unrecognized
        );
        assert_eq!(
            from_pasted_url("https://github.com/a/b/releases/download/v1/"),
            PastedUrl::Unrecognized
        );
        assert_eq!(
            from_pasted_url("http://raw.githubusercontent.com/a/b/main/README.md"),
            PastedUrl::Unrecognized
        );
        assert_eq!(
            from_pasted_url("https://github.com/a//blob/main/x.js"),
            PastedUrl::Unrecognized
        );
    }

    #[test]
    fn malformed_input_is_distinct_from_unrecognized() {
        assert!(matches!(
            from_pasted_url("not a url"),
            PastedUrl::Malformed(_)
        ));
        assert!(matches!(from_pasted_url(""), PastedUrl::Malformed(_)));
    }

    #[test]
    fn raw_route_round_trips_through_github_url() {
        for path in ["src/lib.rs", "docs/my file.md", "文档/说明.md", "c#d.txt", "a?b.md", "100%.txt"] {
            let original = request(ResourceKind::Raw, "main", path);
            let upstream = to_upstream(&original, &UpstreamHosts::default()).unwrap();
            let recovered = from_pasted_url(&upstream.url).request().unwrap();

            assert_eq!(recovered.owner(), original.owner());
            assert_eq!(recovered.repo(), original.repo());
            assert_eq!(recovered.ref_or_tag(), original.ref_or_tag());
            assert_eq!(recovered.path_segments(), original.path_segments());
            assert_eq!(recovered, original);
        }
    }

    #[test]
    fn upstream_url_encodes_each_segment() {
        let hosts = UpstreamHosts::default();
        let raw = to_upstream(&request(ResourceKind::Raw, "main", "c#d.txt"), &hosts).unwrap();
        assert_eq!(raw.url, "https://raw.githubusercontent.com/a/b/main/c%23d.txt");
        assert_eq!(raw.expected_content_type, Some("text/plain"));

        let raw = to_upstream(&request(ResourceKind::Raw, "main", "docs/a?b.md"), &hosts).unwrap();
        assert_eq!(raw.url, "https://raw.githubusercontent.com/a/b/main/docs/a%3Fb.md");

        let release =
            to_upstream(&request(ResourceKind::Release, "v1", "说明 v1.zip"), &hosts).unwrap();
        assert_eq!(
            release.url,
            "https://github.com/a/b/releases/download/v1/%E8%AF%B4%E6%98%8E%20v1.zip"
        );
        assert!(release.url.is_ascii());
    }

    #[test]
    fn pasted_url_segments_are_decoded() {
        let recovered = from_pasted_url("https://github.com/a/b/blob/main/docs/my%20file.md")
            .request()
            .unwrap();
        assert_eq!(recovered.path_segments(), &["docs", "my file.md"]);

        // The URL parser encodes a literal space before matching.
        let recovered = from_pasted_url("https://github.com/a/b/blob/main/my file.md")
            .request()
            .unwrap();
        assert_eq!(recovered.file_name(), "my file.md");
    }

    #[test]
    fn undecodable_segments_are_unrecognized() {
        assert_eq!(
            from_pasted_url("https://github.com/a/b/blob/main/%FF.txt"),
            PastedUrl::Unrecognized
        );
        assert_eq!(
            from_pasted_url("https://github.com/a/b/blob/main/x%2Fy.txt"),
            PastedUrl::Unrecognized
        );
        assert_eq!(
            from_pasted_url("https://github.com/a/b/blob/main/x%0A.txt"),
            PastedUrl::Unrecognized
        );
    }

    #[test]
    fn release_route_round_trips_through_github_url() {
        let original = request(ResourceKind::Release, "v2.1.0", "tool-x86_64.tar.gz");
        let upstream = to_upstream(&original, &UpstreamHosts::default()).unwrap();
        assert_eq!(from_pasted_url(&upstream.url).request(), Some(original));
    }
}
