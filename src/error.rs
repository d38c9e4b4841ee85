//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service and repository layers returns
//! [`AppError`]. Handlers propagate it with `?` and axum renders it through
//! [`IntoResponse`] as a JSON body of the form:
//!
//! ```json
//! { "detail": "URL not found" }
//! ```
//!
//! Infrastructure faults are never folded into [`AppError::NotFound`]: a
//! missing record and an unreachable database are different conditions.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::{is_connectivity_error, is_unique_violation_on_key};

/// Message returned for every unknown or inactive key or secret key.
pub const URL_NOT_FOUND: &str = "URL not found";

/// Seconds a client should wait before retrying after a 503.
const RETRY_AFTER_SECONDS: &str = "5";

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    context: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The store could not be reached. Safe to retry.
    #[error("{message}")]
    Unavailable { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// The not-found error shared by redirect and admin lookups.
    pub fn url_not_found() -> Self {
        Self::not_found(URL_NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Unavailable { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Internal { message, details } => {
                tracing::error!(%details, "{}", message);
            }
            AppError::Unavailable { message } => {
                tracing::error!("{}", message);
            }
            _ => {}
        }

        let retryable = self.is_retryable();

        let (detail, context) = match self {
            AppError::Validation { message, details } | AppError::Conflict { message, details } => {
                (message, details)
            }
            AppError::NotFound { message } | AppError::Unavailable { message } => {
                (message, Value::Null)
            }
            // Internal details stay in the logs.
            AppError::Internal { message, .. } => (message, Value::Null),
        };

        let body = Json(ErrorBody { detail, context });

        if retryable {
            (status, [(header::RETRY_AFTER, RETRY_AFTER_SECONDS)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_key(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint())
                .map(str::to_owned);
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            );
        }

        if is_connectivity_error(&e) {
            return AppError::unavailable("Database unavailable");
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Validation failed", Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body_has_fixed_detail() {
        let response = AppError::url_not_found().into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "detail": "URL not found" }));
    }

    #[tokio::test]
    async fn test_validation_body_includes_context() {
        let response =
            AppError::bad_request("Validation failed", json!({ "target_url": ["bad"] }))
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Validation failed");
        assert_eq!(body["context"]["target_url"][0], "bad");
    }

    #[tokio::test]
    async fn test_internal_body_hides_details() {
        let response =
            AppError::internal("Database error", json!({ "reason": "secret" })).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "detail": "Database error" }));
    }

    #[tokio::test]
    async fn test_unavailable_sets_retry_after() {
        let response = AppError::unavailable("Database unavailable").into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            RETRY_AFTER_SECONDS
        );
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);

        assert!(matches!(err, AppError::Unavailable { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_sqlx_errors_map_to_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);

        assert!(matches!(err, AppError::Internal { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_display_uses_message() {
        assert_eq!(AppError::url_not_found().to_string(), "URL not found");
    }
}
