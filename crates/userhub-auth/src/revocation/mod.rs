//! Token revocation blocklist.

pub mod store;

pub use store::RevocationStore;
