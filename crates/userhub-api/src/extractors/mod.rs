//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::{AdminUser, AuthUser, Guarded, RefreshUser};
pub use json::ValidatedJson;
pub use path::parse_uuid;
