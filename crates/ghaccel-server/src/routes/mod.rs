//! Route definitions for the accelerator.
//!
//! ## Routes
//!
//! - `GET /` - Home page with the URL converter
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /api/release/{owner}/{repo}/{tag}/{*file}` - Release asset
//! - `GET /api/archive/{owner}/{repo}/{ref}/{format}` - Branch archive (zip, tar.gz)
//! - `GET /api/raw/{owner}/{repo}/{ref}/{*path}` - Raw file
//! - `GET /api/preview/{*path}` - Redirect to the preview page or the API
//! - `GET /api/convert?url=` - Translate a pasted GitHub URL (JSON)
//! - `GET /preview/{*path}` - HTML preview page

mod assets;
mod convert;
mod dispatch;
mod health;
mod home;
mod preview;

use axum::Router;
use axum::http::Request;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::state::AppState;

/// Build the complete accelerator router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .route(
            "/api/release/{owner}/{repo}/{tag}/{*file}",
            get(assets::release_handler),
        )
        .route(
            "/api/archive/{owner}/{repo}/{reference}/{format}",
            get(assets::archive_handler),
        )
        .route(
            "/api/raw/{owner}/{repo}/{reference}/{*path}",
            get(assets::raw_handler),
        )
        .route("/api/preview", get(dispatch::empty_dispatch_handler))
        .route("/api/preview/", get(dispatch::empty_dispatch_handler))
        .route("/api/preview/{*path}", get(dispatch::dispatch_handler))
        .route("/api/convert", get(convert::convert_handler))
        .route("/preview/{*path}", get(preview::preview_page))
        .with_state(state)
}

/// The router wrapped in request tracing and a permissive CORS policy.
///
/// Accelerated files are fetched cross-origin by browsers and download tools.
pub fn app(state: AppState) -> Router {
    router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "accel_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Serve robots.txt.
///
/// Accelerated files are not meant to be indexed.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nDisallow: /api/\nDisallow: /preview/\n",
    )
}
