//! Data models shared between the middleware and the handlers.

/// Authenticated identity and session token claims
pub mod identity;
