//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the cache, and provide a small API
//! for HTTP handlers and the admin CLI.
//!
//! - [`services::url_service::UrlService`] - Record creation and lookups
//! - [`services::redirect_service::RedirectService`] - Cached redirect resolution and click counting

pub mod services;
