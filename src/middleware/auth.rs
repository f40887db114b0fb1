//! Session authentication middleware.
//!
//! Runs in front of every route. For each in-scope request it:
//! 1. Resolves the caller's identity from the session token (if any)
//! 2. Injects the identity into the request extensions
//! 3. Rejects requests to protected routes that have no identity with HTTP 401

use crate::{error::AppError, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Session authentication middleware function.
///
/// # Flow
///
/// 1. Skip the request entirely if the path is outside the middleware scope
///    (framework internals, static assets)
/// 2. Ask the identity provider for the caller's identity
/// 3. If found: insert `Identity` into the request extensions
/// 4. If the path is protected and no identity was found: return 401
/// 5. Otherwise call the next handler
///
/// Public routes see the identity too when the caller happens to be signed in.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_owned();

    if !state.scope.applies_to(&path) {
        return Ok(next.run(request).await);
    }

    let identity = state.identity_provider.authenticate(request.headers());
    let authenticated = identity.is_some();

    if let Some(identity) = identity {
        tracing::debug!(user_id = %identity.user_id, path = %path, "Request authenticated");
        request.extensions_mut().insert(identity);
    }

    if !authenticated && state.protected_routes.is_match(&path) {
        tracing::warn!(path = %path, "Rejected unauthenticated request to protected route");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
