//! HTTP router assembly.

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware, state::AppState};

/// Build the application router.
///
/// The auth middleware is layered over the whole router, fallback included,
/// so protected path prefixes are gated even when no route matches them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/api/health", get(handlers::health::health_check))
        // Protected by the auth middleware
        .route("/api/protected", get(handlers::protected::protected_route))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
