//! URL record entity.

use chrono::{DateTime, Utc};

use crate::utils::key_generator::SECRET_KEY_SEPARATOR;

/// A stored mapping from a short key to a target URL.
///
/// `key` and `secret_key` are immutable after creation. `clicks` only ever
/// grows, one per successful redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: i64,
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Returns true if `secret_key` is `key` followed by the separator.
    pub fn secret_matches_key(&self) -> bool {
        self.secret_key
            .strip_prefix(self.key.as_str())
            .and_then(|rest| rest.strip_prefix(SECRET_KEY_SEPARATOR))
            .is_some_and(|suffix| !suffix.is_empty())
    }
}

/// Input for inserting a new record. Counters and flags take their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
}

/// Aggregate figures over active records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlSummary {
    pub active_urls: i64,
    pub total_clicks: i64,
}
