//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: database reachable (cache may be degraded)
/// - **503 Service Unavailable**: database unreachable
///
/// The cache is an optimisation, so a failing cache is reported but does not
/// make the service unhealthy.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 12 active URLs" },
///     "cache": { "status": "ok", "message": "Cache reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let cache = check_cache(&state).await;

    let db_ok = database.is_ok();
    let status = match (db_ok, cache.is_ok()) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        (false, _) => "unhealthy",
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    if db_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity with an aggregate query.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.url_service.summary().await {
        Ok(summary) => CheckStatus::ok(format!(
            "Connected, {} active URLs",
            summary.active_urls
        )),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}
