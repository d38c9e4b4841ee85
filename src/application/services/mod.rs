//! Business logic services for the application layer.

pub mod redirect_service;
pub mod url_service;

pub use redirect_service::{LookupSource, RedirectService, ResolvedUrl};
pub use url_service::UrlService;
