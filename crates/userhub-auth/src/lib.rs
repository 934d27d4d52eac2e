//! # userhub-auth
//!
//! Authentication and authorization for UserHub.
//!
//! ## Modules
//!
//! - `jwt`: signed token issuance and parsing
//! - `password`: Argon2id password hashing and length policy
//! - `revocation`: jti blocklist backed by the shared cache
//! - `session`: login, refresh, logout and token resolution
//! - `gate`: per-request guard combining token resolution and role checks

pub mod gate;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

pub use gate::{AccessGate, Authorized, GateStage, GuardSpec};
pub use jwt::{ClaimSet, Claims, TokenCodec, TokenKind};
pub use password::{PasswordHasher, PasswordValidator};
pub use revocation::RevocationStore;
pub use session::{ResolvedToken, SessionService, TokenPair};
