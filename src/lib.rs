//! Session-gated API service.
//!
//! Two endpoints in front of a PostgreSQL pool: a public liveness probe and a
//! route that only answers signed-in callers. Sign-in itself is handled by an
//! external identity provider; this service verifies its session tokens.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;
