//! JWT issuance, parsing, and claims.

pub mod claims;
pub mod codec;

pub use claims::{ClaimSet, Claims, TokenKind};
pub use codec::TokenCodec;
