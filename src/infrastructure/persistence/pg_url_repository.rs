//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl, UrlSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const URL_COLUMNS: &str = "id, key, secret_key, target_url, is_active, clicks, created_at";

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    key: String,
    secret_key: String,
    target_url: String,
    is_active: bool,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for ShortUrl {
    fn from(r: UrlRow) -> Self {
        ShortUrl {
            id: r.id,
            key: r.key,
            secret_key: r.secret_key,
            target_url: r.target_url,
            is_active: r.is_active,
            clicks: r.clicks,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for URL records.
///
/// All statements are parameterised and run on connections checked out of
/// the shared pool for the duration of a single statement.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_active_by(&self, column: &str, value: &str) -> Result<Option<ShortUrl>, AppError> {
        let sql = format!("SELECT {URL_COLUMNS} FROM urls WHERE {column} = $1 AND is_active");

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(ShortUrl::from))
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let sql = format!(
            "INSERT INTO urls (key, secret_key, target_url) VALUES ($1, $2, $3) RETURNING {URL_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(&new_url.key)
            .bind(&new_url.secret_key)
            .bind(&new_url.target_url)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ShortUrl>, AppError> {
        self.find_active_by("key", key).await
    }

    async fn find_by_secret_key(&self, secret_key: &str) -> Result<Option<ShortUrl>, AppError> {
        self.find_active_by("secret_key", secret_key).await
    }

    async fn increment_clicks(&self, url: &ShortUrl) -> Result<ShortUrl, AppError> {
        let sql = format!(
            "UPDATE urls SET clicks = clicks + 1 WHERE id = $1 AND is_active RETURNING {URL_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(url.id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(ShortUrl::from).ok_or_else(AppError::url_not_found)
    }

    async fn summary(&self) -> Result<UrlSummary, AppError> {
        let (active_urls, total_clicks): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(clicks), 0)::BIGINT FROM urls WHERE is_active",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UrlSummary {
            active_urls,
            total_clicks,
        })
    }
}
