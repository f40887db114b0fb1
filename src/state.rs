//! Application state shared across handlers and middleware.

use std::sync::Arc;

use crate::{
    auth::IdentityProvider,
    db::Database,
    middleware::route_matcher::{MiddlewareScope, RouteMatcher},
};

/// Everything a request needs beyond the request itself.
///
/// Cloned per request by Axum, so every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub protected_routes: Arc<RouteMatcher>,
    pub scope: Arc<MiddlewareScope>,
}

impl AppState {
    /// State with the standard protected route set and middleware scope.
    pub fn new(
        db: Arc<dyn Database>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            db,
            identity_provider,
            protected_routes: Arc::new(RouteMatcher::protected_routes()?),
            scope: Arc::new(MiddlewareScope::new()?),
        })
    }
}
