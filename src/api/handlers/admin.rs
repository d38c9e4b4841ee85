//! Handler for the secret admin lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url_info::UrlInfo;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the state of a short URL to the holder of its secret key.
///
/// # Endpoint
///
/// `GET /admin/{secret_key}`
///
/// Read-only: the lookup does not count as a click.
///
/// # Errors
///
/// Returns 404 Not Found if the secret key is unknown or inactive.
pub async fn admin_info_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlInfo>, AppError> {
    let record = state.url_service.get_by_secret_key(&secret_key).await?;

    Ok(Json(UrlInfo::from_record(record, &state.base_url)))
}
