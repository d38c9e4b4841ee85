//! DTOs for creating short URLs and reporting their state.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::ShortUrl;

/// Request body of `POST /shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The destination address (must be an absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long"))]
    #[validate(custom(function = "validate_location_safe"))]
    pub target_url: String,
}

/// Rejects URLs that cannot be sent back verbatim in a `Location` header.
fn validate_location_safe(target_url: &str) -> Result<(), ValidationError> {
    if target_url.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(())
    } else {
        Err(ValidationError::new("location_safe").with_message(
            "URL must be ASCII without spaces; percent-encode other characters".into(),
        ))
    }
}

/// Public view of a URL record, returned by `POST /shorten` and
/// `GET /admin/{secret_key}`.
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "is_active": true,
///   "clicks": 0,
///   "url": "http://localhost:3000/Ab3_x9Q",
///   "admin_url": "http://localhost:3000/admin/Ab3_x9Q_k2LmN0pQrSt"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlInfo {
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub url: String,
    pub admin_url: String,
}

impl UrlInfo {
    /// Builds the view of `record`; `base_url` must not end with a slash.
    pub fn from_record(record: ShortUrl, base_url: &str) -> Self {
        Self {
            url: format!("{}/{}", base_url, record.key),
            admin_url: format!("{}/admin/{}", base_url, record.secret_key),
            target_url: record.target_url,
            is_active: record.is_active,
            clicks: record.clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_from_record_builds_urls() {
        let record = ShortUrl {
            id: 1,
            key: "Ab3_x9Q".to_string(),
            secret_key: "Ab3_x9Q_k2LmN0pQrSt".to_string(),
            target_url: "https://example.com".to_string(),
            is_active: true,
            clicks: 2,
            created_at: Utc::now(),
        };

        let info = UrlInfo::from_record(record, "https://s.example.com");

        assert_eq!(info.url, "https://s.example.com/Ab3_x9Q");
        assert_eq!(info.admin_url, "https://s.example.com/admin/Ab3_x9Q_k2LmN0pQrSt");
        assert_eq!(info.target_url, "https://example.com");
        assert_eq!(info.clicks, 2);
        assert!(info.is_active);
    }

    #[test]
    fn test_request_accepts_absolute_url() {
        let req = CreateUrlRequest {
            target_url: "https://example.com/some/path?q=1".to_string(),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_invalid_url() {
        let req = CreateUrlRequest {
            target_url: "not a url".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_rejects_non_ascii_url() {
        let req = CreateUrlRequest {
            target_url: "https://exämple.com/".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_rejects_overlong_url() {
        let req = CreateUrlRequest {
            target_url: format!("https://example.com/{}", "a".repeat(2048)),
        };

        assert!(req.validate().is_err());
    }
}
