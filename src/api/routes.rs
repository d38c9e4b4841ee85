//! API route configuration.

use crate::api::handlers::{admin_info_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes subject to admission control.
///
/// - `POST /shorten` - Create a short URL
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

/// Lookup routes for holders of a secret key.
///
/// - `GET /admin/{secret_key}` - Show a short URL's state and click count
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/{secret_key}", get(admin_info_handler))
}
