//! Request value types shared by the translator and the fetch proxy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;
use crate::policy::{DeliveryPolicy, Disposition};
use crate::segment;

/// The three kinds of GitHub content the accelerator serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Release asset (`/releases/download/{tag}/{file}`).
    Release,
    /// Branch archive (`/archive/refs/heads/{ref}.{format}`).
    Archive,
    /// Raw repository file.
    Raw,
}

impl ResourceKind {
    /// Route segment used under `/api/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Archive => "archive",
            Self::Raw => "raw",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Release => "Release Asset",
            Self::Archive => "Repository Archive",
            Self::Raw => "Raw File",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(Self::Release),
            "archive" => Ok(Self::Archive),
            "raw" => Ok(Self::Raw),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// An accelerator-facing request for one GitHub resource.
///
/// All components are stored decoded. For archives, `path_segments` holds
/// exactly the format (`zip` or `tar.gz`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    kind: ResourceKind,
    owner: String,
    repo: String,
    ref_or_tag: String,
    path_segments: Vec<String>,
}

impl ResourceRequest {
    /// Build a request, rejecting empty components, empty paths and control
    /// characters anywhere.
    pub fn new(
        kind: ResourceKind,
        owner: impl Into<String>,
        repo: impl Into<String>,
        ref_or_tag: impl Into<String>,
        path_segments: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let owner = owner.into();
        let repo = repo.into();
        let ref_or_tag = ref_or_tag.into();

        if owner.is_empty() {
            return Err(ValidationError::MissingComponent("owner"));
        }
        if repo.is_empty() {
            return Err(ValidationError::MissingComponent("repo"));
        }
        if ref_or_tag.is_empty() {
            return Err(ValidationError::MissingComponent("ref"));
        }
        if path_segments.is_empty() || path_segments.iter().all(|s| s.is_empty()) {
            return Err(ValidationError::EmptyPath);
        }

        let has_control = |s: &str| s.chars().any(char::is_control);
        for (name, value) in [("owner", &owner), ("repo", &repo), ("ref", &ref_or_tag)] {
            if has_control(value.as_str()) {
                return Err(ValidationError::ControlCharacter(name));
            }
        }
        if path_segments.iter().any(|s| has_control(s.as_str())) {
            return Err(ValidationError::ControlCharacter("path"));
        }

        Ok(Self {
            kind,
            owner,
            repo,
            ref_or_tag,
            path_segments,
        })
    }

    /// Build a request from a slash-joined path as captured by a wildcard route.
    pub fn from_path(
        kind: ResourceKind,
        owner: impl Into<String>,
        repo: impl Into<String>,
        ref_or_tag: impl Into<String>,
        path: &str,
    ) -> Result<Self, ValidationError> {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(kind, owner, repo, ref_or_tag, segments)
    }

    /// Build a request from `{kind}/{owner}/{repo}/{ref}/{rest...}` segments,
    /// the shape used by the preview routes.
    pub fn from_segments(segments: &[&str]) -> Result<Self, ValidationError> {
        match segments {
            [] => Err(ValidationError::EmptyPath),
            [kind, owner, repo, ref_or_tag, rest @ ..] => Self::new(
                kind.parse()?,
                *owner,
                *repo,
                *ref_or_tag,
                rest.iter().map(|s| s.to_string()).collect(),
            ),
            [kind, ..] => {
                kind.parse::<ResourceKind>()?;
                Err(ValidationError::EmptyPath)
            }
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn ref_or_tag(&self) -> &str {
        &self.ref_or_tag
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Path segments joined with `/`.
    pub fn path(&self) -> String {
        self.path_segments.join("/")
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path_segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Filename offered in `Content-Disposition: attachment`.
    pub fn fallback_filename(&self) -> String {
        match self.kind {
            ResourceKind::Release => self.path(),
            ResourceKind::Archive => {
                format!("{}-{}.{}", self.repo, self.ref_or_tag, self.file_name())
            }
            ResourceKind::Raw => self.file_name().to_string(),
        }
    }

    /// Path of this resource on the accelerator, e.g. `/api/raw/a/b/main/README.md`.
    ///
    /// Each segment is percent-encoded.
    pub fn api_path(&self) -> String {
        format!(
            "/api/{}/{}/{}/{}/{}",
            self.kind,
            segment::encode(&self.owner),
            segment::encode(&self.repo),
            segment::encode(&self.ref_or_tag),
            segment::encode_all(self.path_segments.as_slice())
        )
    }

    /// Absolute accelerated URL under `base_url`.
    pub fn accelerated_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.api_path())
    }

    /// Path of the HTML preview page for this resource.
    pub fn preview_path(&self) -> String {
        format!("/preview{}", self.api_path().trim_start_matches("/api"))
    }
}

/// Per-call options parsed from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Bypass any intermediate cache and revalidate with upstream.
    pub force_refresh: bool,
    /// Serve `inline` instead of `attachment`.
    pub preview_requested: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            force_refresh: false,
            preview_requested: true,
        }
    }
}

impl RequestOptions {
    /// Parse the `preview` and `refresh` query parameters.
    ///
    /// `preview` is true unless it is exactly `"false"`; when absent the
    /// policy's default disposition decides. `refresh` is true only when it is
    /// exactly `"true"`.
    pub fn from_query(
        preview: Option<&str>,
        refresh: Option<&str>,
        policy: &DeliveryPolicy,
    ) -> Self {
        let preview_requested = match preview {
            Some(value) => value != "false",
            None => policy.default_disposition == Disposition::Inline,
        };

        Self {
            force_refresh: refresh == Some("true"),
            preview_requested,
        }
    }
}
