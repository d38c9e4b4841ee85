//! Handler for the short URL creation endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::url_info::{CreateUrlRequest, UrlInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a target URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// Rate limited per client address (see [`crate::api::middleware::rate_limit`]).
/// Every call creates a new record, even for a target that was shortened before.
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://example.com" }
/// ```
///
/// # Response
///
/// A [`UrlInfo`] with `clicks = 0`.
///
/// # Errors
///
/// Returns 400 Bad Request if the target URL is invalid.
/// Returns 429 Too Many Requests when the client exceeded its quota.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<Json<UrlInfo>, AppError> {
    payload.validate()?;

    let record = state.url_service.create(payload.target_url).await?;

    Ok(Json(UrlInfo::from_record(record, &state.base_url)))
}
