//! Utility functions shared across layers.
//!
//! - [`key_generator`] - Public and secret key generation
//! - [`db_error`] - PostgreSQL error classification

pub mod db_error;
pub mod key_generator;
