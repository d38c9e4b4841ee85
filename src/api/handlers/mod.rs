//! HTTP request handlers.

pub mod admin;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use admin::admin_info_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
