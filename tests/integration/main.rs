//! HTTP integration tests driving the full router against in-memory
//! collaborators.

mod helpers;

mod auth_test;
mod routing_test;
mod user_test;
