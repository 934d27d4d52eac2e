//! User directory: signup, profile updates, and lifecycle toggles.

pub mod service;

pub use service::{NewUser, UserService};
