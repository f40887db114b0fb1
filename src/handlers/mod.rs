//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives shared state and the identity resolved by the middleware
//! 2. Runs one query through the `Database` seam
//! 3. Returns a JSON response with the matching status code

/// Liveness probe
pub mod health;
/// Authenticated database check
pub mod protected;
