//! HTML preview page: `GET /preview/{kind}/{owner}/{repo}/{ref}/{path...}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use ghaccel_core::content_type::{PreviewKind, preview_kind};
use ghaccel_core::{ResourceRequest, to_upstream};

use crate::error::AccelError;
use crate::render::components::{error_page, html_response};
use crate::render::preview::{self, PreviewBody};
use crate::state::AppState;

const PREVIEW_TRANSPORT_ERROR: &str = "Failed to fetch preview content";

/// Render the preview page for an accelerated resource.
///
/// Text files are fetched through the upstream client and embedded; images
/// and PDFs are embedded by URL; everything else gets a download button.
pub async fn preview_page(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let request = match ResourceRequest::from_segments(&segments) {
        Ok(request) => request,
        Err(err) => return error_page(StatusCode::BAD_REQUEST, "Invalid Path", &err.to_string()),
    };

    let target = match to_upstream(&request, &state.config.upstream) {
        Ok(target) => target,
        Err(err) => return error_page(StatusCode::BAD_REQUEST, "Invalid Path", &err.to_string()),
    };

    let body = match preview_kind(request.file_name()) {
        PreviewKind::Image => PreviewBody::Image,
        PreviewKind::Pdf => PreviewBody::Pdf,
        PreviewKind::Unsupported => PreviewBody::Unsupported,
        PreviewKind::Text => {
            match state
                .fetcher
                .fetch(&target.url, false, PREVIEW_TRANSPORT_ERROR)
                .await
            {
                Ok(upstream) => PreviewBody::text(&upstream.body),
                Err(err) => {
                    if let AccelError::Transport { source, .. } = &err {
                        tracing::warn!(error = %source, url = %target.url, "preview fetch failed");
                    }
                    let (_, message) = err.status_and_message();
                    PreviewBody::Error(message)
                }
            }
        }
    };

    let markup = preview::render(&request, &target.url, &body, &state.config.site_name);
    html_response(StatusCode::OK, markup)
}
