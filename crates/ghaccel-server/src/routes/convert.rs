//! URL converter API: `GET /api/convert?url=...`.
//!
//! Returns the accelerated form of a pasted GitHub raw, blob or release link:
//!
//! ```json
//! {
//!   "accelerated_url": "https://proxy.example.com/api/raw/a/b/main/README.md",
//!   "preview_url": "https://proxy.example.com/preview/raw/a/b/main/README.md",
//!   "kind": "raw"
//! }
//! ```

use axum::Json;
use axum::extract::{Query, State};
use ghaccel_core::{PastedUrl, ResourceKind, from_pasted_url};
use serde::{Deserialize, Serialize};

use crate::error::AccelError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    url: Option<String>,
}

/// Converter response.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    pub accelerated_url: String,
    pub preview_url: String,
    pub kind: ResourceKind,
}

pub async fn convert_handler(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConvertResponse>, AccelError> {
    let input = query.url.unwrap_or_default();

    match from_pasted_url(&input) {
        PastedUrl::Recognized(request) => {
            let base_url = &state.config.base_url;
            Ok(Json(ConvertResponse {
                accelerated_url: request.accelerated_url(base_url),
                preview_url: format!("{base_url}{}", request.preview_path()),
                kind: request.kind(),
            }))
        }
        PastedUrl::Unrecognized => Err(AccelError::UnrecognizedUrl),
        PastedUrl::Malformed(reason) => Err(AccelError::MalformedUrl(reason)),
    }
}
