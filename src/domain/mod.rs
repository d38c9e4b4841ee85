//! Domain layer containing the URL record and its storage contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Storage is described by traits implemented in
//! [`crate::infrastructure::persistence`].
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
