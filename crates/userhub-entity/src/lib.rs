//! # userhub-entity
//!
//! Domain entity models for UserHub. Database entities derive
//! `sqlx::FromRow` in addition to the serde traits.

pub mod user;
