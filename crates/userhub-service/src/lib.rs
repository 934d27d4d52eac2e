//! # userhub-service
//!
//! Business logic for the user directory. Services follow constructor
//! injection: all dependencies are provided at construction time via `Arc`.

pub mod user;

pub use user::{NewUser, UserService};
