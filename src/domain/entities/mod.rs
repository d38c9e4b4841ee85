//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored key to target URL mapping with its click counter
//! - [`NewShortUrl`] - Input for creating a record
//! - [`UrlSummary`] - Aggregate figures over active records

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl, UrlSummary};
