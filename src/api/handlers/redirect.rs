//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Resolution and click counting are delegated to
/// [`crate::application::services::RedirectService`]; the click is recorded
/// before the `307 Temporary Redirect` is sent.
///
/// # Errors
///
/// Returns 404 Not Found with `{"detail": "URL not found"}` if the key is
/// unknown or inactive.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resolved = state.redirect_service.resolve(&key).await?;

    debug!(
        key = %key,
        source = ?resolved.source,
        clicks = resolved.clicks,
        "Redirecting"
    );

    let location = HeaderValue::from_str(&resolved.target_url).map_err(|_| {
        AppError::internal(
            "Target URL is not a valid Location header",
            json!({ "key": key }),
        )
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
