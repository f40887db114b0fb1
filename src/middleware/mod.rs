//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! Here they decide which requests need a signed-in caller and
//! short-circuit the ones that don't have one.

/// Session authentication middleware
pub mod auth;
/// Path predicates for the protected route set and middleware scope
pub mod route_matcher;
