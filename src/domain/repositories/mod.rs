//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; mocks are
//! generated with `mockall` for unit tests.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
