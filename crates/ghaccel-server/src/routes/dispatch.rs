//! Preview dispatcher: `/api/preview/{*path}`.

use axum::extract::Path;
use axum::response::Redirect;
use ghaccel_core::ValidationError;
use ghaccel_core::dispatch::dispatch;

use crate::error::AccelError;

/// Redirect to the preview page for binaries and archives, otherwise to the
/// API route with `preview=true`.
pub async fn dispatch_handler(Path(path): Path<String>) -> Result<Redirect, AccelError> {
    let target = dispatch(&path)?;
    tracing::debug!(path = %path, location = %target.location(), "preview dispatch");
    Ok(Redirect::temporary(target.location()))
}

/// `/api/preview` with nothing after it.
pub async fn empty_dispatch_handler() -> AccelError {
    AccelError::Validation(ValidationError::EmptyPath)
}
