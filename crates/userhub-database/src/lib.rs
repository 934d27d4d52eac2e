//! # userhub-database
//!
//! PostgreSQL connection management and the user repositories consumed by
//! the auth and directory services. An in-memory repository with the same
//! uniqueness guarantees backs tests and single-node development runs.

pub mod pool;
pub mod repositories;

pub use repositories::{MemoryUserRepository, PgUserRepository, UserStore};
