//! HTTP API layer.
//!
//! Translates HTTP requests into service calls and formats responses.
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and tracing
//! - [`routes`] - Route groups

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
