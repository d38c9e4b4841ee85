//! Repository trait for URL record storage.

use crate::domain::entities::{NewShortUrl, ShortUrl, UrlSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage of URL records and their click counters.
///
/// Every lookup only sees records with `is_active = true`. Every write is
/// committed before the call returns.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `clicks = 0` and `is_active = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key or secret key is already taken.
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on database errors.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds the active record with the given public key.
    async fn find_by_key(&self, key: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds the active record with the given secret key.
    async fn find_by_secret_key(&self, secret_key: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Atomically adds one click and returns the updated record.
    ///
    /// Implemented as a single statement so concurrent increments never lose
    /// updates and a cancelled caller cannot leave a half-applied increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record is no longer active.
    async fn increment_clicks(&self, url: &ShortUrl) -> Result<ShortUrl, AppError>;

    /// Counts active records and sums their clicks.
    async fn summary(&self) -> Result<UrlSummary, AppError>;
}
