//! Error types for the accelerator API.
//!
//! Every failure is rendered as `{ "error": "..." }`. Upstream failures keep
//! the upstream status code; transport failures are logged and reported with
//! a fixed message so that no internal detail reaches the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ghaccel_core::{ResourceKind, ValidationError};
use serde::Serialize;

/// Message used when a pasted URL is not a supported GitHub link.
pub const INVALID_GITHUB_URL: &str = "Invalid GitHub URL";

/// Accelerator error type.
#[derive(Debug, thiserror::Error)]
pub enum AccelError {
    /// Rejected before any upstream request (bad archive format, empty path).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {reason}")]
    Upstream { status: StatusCode, reason: String },

    /// Upstream could not be reached or the body could not be read.
    #[error("{message}: {source}")]
    Transport {
        /// Fixed client-facing message.
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Input to the converter is not a URL.
    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    /// Input to the converter is a URL, but not a supported GitHub link.
    #[error("unrecognized GitHub URL")]
    UnrecognizedUrl,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Client-facing message for a transport failure on a resource kind.
pub fn transport_message(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Release => "Failed to fetch release asset",
        ResourceKind::Archive => "Failed to fetch repository archive",
        ResourceKind::Raw => "Failed to fetch raw file",
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AccelError {
    /// Status code and client-facing message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Upstream { status, reason } => {
                (*status, format!("Failed to fetch from GitHub: {reason}"))
            }
            Self::Transport { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            Self::MalformedUrl(_) => (StatusCode::BAD_REQUEST, INVALID_GITHUB_URL.to_string()),
            Self::UnrecognizedUrl => (
                StatusCode::UNPROCESSABLE_ENTITY,
                INVALID_GITHUB_URL.to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for AccelError {
    fn into_response(self) -> Response {
        match &self {
            Self::Transport { source, .. } => {
                tracing::error!(error = %source, "upstream transport error");
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
            }
            _ => {}
        }

        let (status, error) = self.status_and_message();
        (status, Json(ErrorResponse { error })).into_response()
    }
}
