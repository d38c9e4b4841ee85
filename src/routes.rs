//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`              - Create a short URL (rate limited)
//! - `GET  /admin/{secret_key}`   - Admin view of a short URL
//! - `GET  /health`               - Health check: database and cache
//! - `GET  /{key}`                - Short URL redirect
//!
//! Static segments win over `/{key}`, so `health` and `shorten` can never
//! be shadowed by a generated key.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging on every route
//! - **Rate limiting** - Per-client token bucket on `/shorten` only

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};

/// Settings that shape the router.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// When `true`, rate limiting reads the client IP from `X-Forwarded-For` /
    /// `X-Real-IP` instead of the peer socket address. Enable only behind a
    /// trusted reverse proxy.
    pub behind_proxy: bool,
    /// Create requests allowed per client per minute.
    pub shorten_rate_per_minute: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            behind_proxy: false,
            shorten_rate_per_minute: 5,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// The peer address is read from `ConnectInfo<SocketAddr>`, so the router must
/// be served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, config: RouterConfig) -> Result<Router> {
    let per_minute = config.shorten_rate_per_minute;

    let shorten_router = if config.behind_proxy {
        api::routes::shorten_routes()
            .layer(rate_limit::shorten_layer(SmartIpKeyExtractor, per_minute)?)
    } else {
        api::routes::shorten_routes()
            .layer(rate_limit::shorten_layer(PeerIpKeyExtractor, per_minute)?)
    };

    let router = Router::new()
        .merge(shorten_router)
        .merge(api::routes::admin_routes())
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    Ok(router)
}
