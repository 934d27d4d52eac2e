//! Session lifecycle: credential checks, token pairs, and token resolution.

pub mod service;

pub use service::{ResolvedToken, SessionService, TokenPair};
