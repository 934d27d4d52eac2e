//! User repositories: the store trait plus PostgreSQL and in-memory backends.

pub mod memory;
pub mod user;

pub use memory::MemoryUserRepository;
pub use user::{PgUserRepository, UserStore};
