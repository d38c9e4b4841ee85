//! URL record creation and lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl, UrlSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::key_generator::{generate_key, generate_secret_key};

/// Insert attempts before giving up on key collisions.
const MAX_KEY_ATTEMPTS: usize = 5;

/// Service for creating URL records and looking them up.
///
/// Every shorten request creates a fresh record; the same target URL may be
/// shortened any number of times.
pub struct UrlService<R: UrlRepository> {
    url_repository: Arc<R>,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(url_repository: Arc<R>) -> Self {
        Self { url_repository }
    }

    /// Creates a record for `target_url` with freshly generated keys.
    ///
    /// # Key Collisions
    ///
    /// Uniqueness is enforced by the store. When an insert is rejected with
    /// [`AppError::Conflict`] a new key pair is drawn, up to
    /// `MAX_KEY_ATTEMPTS` times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if every attempt collided, or the
    /// repository error on any other failure.
    pub async fn create(&self, target_url: String) -> Result<ShortUrl, AppError> {
        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let key = generate_key();
            let secret_key = generate_secret_key(&key);

            let new_url = NewShortUrl {
                key,
                secret_key,
                target_url: target_url.clone(),
            };

            match self.url_repository.insert(new_url).await {
                Ok(url) => {
                    info!(key = %url.key, id = url.id, "Created short URL");
                    return Ok(url);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Generated key collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique key",
            json!({ "attempts": MAX_KEY_ATTEMPTS }),
        ))
    }

    /// Retrieves the active record for a public key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record matches.
    pub async fn get_by_key(&self, key: &str) -> Result<ShortUrl, AppError> {
        self.url_repository
            .find_by_key(key)
            .await?
            .ok_or_else(AppError::url_not_found)
    }

    /// Retrieves the active record for a secret key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record matches.
    pub async fn get_by_secret_key(&self, secret_key: &str) -> Result<ShortUrl, AppError> {
        self.url_repository
            .find_by_secret_key(secret_key)
            .await?
            .ok_or_else(AppError::url_not_found)
    }

    /// Returns the number of active records and their total clicks.
    pub async fn summary(&self) -> Result<UrlSummary, AppError> {
        self.url_repository.summary().await
    }
}
