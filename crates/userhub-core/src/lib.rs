//! # userhub-core
//!
//! Core crate for UserHub. Contains the unified error system, configuration
//! schemas, the cache provider trait, and pagination types.
//!
//! This crate has **no** internal dependencies on other UserHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
