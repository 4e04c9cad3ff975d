//! Release, archive and raw file handlers.
//!
//! The three routes differ only in how the request is built; validation,
//! translation and delivery are shared.

use axum::extract::{Path, Query, State};
use ghaccel_core::{RequestOptions, ResourceKind, ResourceRequest, to_upstream};
use serde::Deserialize;

use crate::error::AccelError;
use crate::fetch::Delivery;
use crate::state::AppState;

/// `?preview=` and `?refresh=` as raw strings; see [`RequestOptions::from_query`].
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryQuery {
    preview: Option<String>,
    refresh: Option<String>,
}

/// `GET /api/release/{owner}/{repo}/{tag}/{*file}`
pub async fn release_handler(
    State(state): State<AppState>,
    Path((owner, repo, tag, file)): Path<(String, String, String, String)>,
    Query(query): Query<DeliveryQuery>,
) -> Result<Delivery, AccelError> {
    let request = ResourceRequest::from_path(ResourceKind::Release, owner, repo, tag, &file)?;
    serve(&state, &request, &query).await
}

/// `GET /api/archive/{owner}/{repo}/{ref}/{format}`
pub async fn archive_handler(
    State(state): State<AppState>,
    Path((owner, repo, reference, format)): Path<(String, String, String, String)>,
    Query(query): Query<DeliveryQuery>,
) -> Result<Delivery, AccelError> {
    let request = ResourceRequest::new(ResourceKind::Archive, owner, repo, reference, vec![format])?;
    serve(&state, &request, &query).await
}

/// `GET /api/raw/{owner}/{repo}/{ref}/{*path}`
pub async fn raw_handler(
    State(state): State<AppState>,
    Path((owner, repo, reference, path)): Path<(String, String, String, String)>,
    Query(query): Query<DeliveryQuery>,
) -> Result<Delivery, AccelError> {
    let request = ResourceRequest::from_path(ResourceKind::Raw, owner, repo, reference, &path)?;
    serve(&state, &request, &query).await
}

async fn serve(
    state: &AppState,
    request: &ResourceRequest,
    query: &DeliveryQuery,
) -> Result<Delivery, AccelError> {
    let policy = state.config.policies.for_kind(request.kind());
    let target = to_upstream(request, &state.config.upstream)?;
    let options = RequestOptions::from_query(
        query.preview.as_deref(),
        query.refresh.as_deref(),
        &policy,
    );

    tracing::debug!(
        kind = %request.kind(),
        upstream = %target.url,
        refresh = options.force_refresh,
        preview = options.preview_requested,
        "serving accelerated request"
    );

    state
        .fetcher
        .deliver(&target, options, &policy, &request.fallback_filename())
        .await
}
