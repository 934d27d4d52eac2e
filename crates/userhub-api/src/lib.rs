//! # userhub-api
//!
//! HTTP API layer for UserHub built on Axum.
//!
//! Provides the auth and user-directory endpoints, bearer-token extractors
//! backed by the access gate, DTOs, JSON error mapping, and the CORS and
//! request-logging layers.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
