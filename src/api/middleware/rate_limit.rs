//! Admission control for the creation endpoint.
//!
//! Token bucket per client address, provided by `tower_governor`. Requests
//! over the quota are answered with `429 Too Many Requests` before they reach
//! a handler.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

/// Milliseconds in the window the quota is expressed over.
const WINDOW_MS: u64 = 60_000;

/// Creates the rate limiter for `POST /shorten`.
///
/// # Limits
///
/// - **Burst**: `per_minute` requests
/// - **Refill**: one request every `60s / per_minute`
///
/// With the default of 5 this admits 5 requests at once and then one every
/// 12 seconds per client.
///
/// # Key Extraction
///
/// `key_extractor` decides what "one client" is: pass
/// `PeerIpKeyExtractor` to use the socket peer address, or
/// `SmartIpKeyExtractor` when running behind a trusted reverse proxy.
///
/// # Errors
///
/// Returns an error if `per_minute` is 0.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::shorten_layer(PeerIpKeyExtractor, 5)?);
/// ```
pub fn shorten_layer<K>(
    key_extractor: K,
    per_minute: u32,
) -> Result<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
where
    K: KeyExtractor,
{
    anyhow::ensure!(per_minute > 0, "rate limit must allow at least one request");

    let replenish_ms = (WINDOW_MS / u64::from(per_minute)).max(1);

    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_millisecond(replenish_ms)
        .burst_size(per_minute)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
