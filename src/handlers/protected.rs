//! Authenticated endpoint that confirms the caller and the database are both reachable.

use crate::{error::AppError, models::identity::Identity, state::AppState};
use axum::{Extension, Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Protected route response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub success: bool,

    /// Identity resolved by the auth middleware, echoed verbatim
    pub user_id: String,

    pub db_connected: bool,

    /// Current time according to the database server
    pub server_time: DateTime<Utc>,

    pub message: &'static str,
}

/// Protected route handler.
///
/// # Endpoint
///
/// `GET /api/protected`
///
/// # Authentication
///
/// Requires a valid session. The middleware already rejects anonymous
/// requests to this path; the handler checks again and never answers with
/// success unless a non-empty user id is present.
///
/// # Response
///
/// - **Success (200 OK)**:
///
/// ```json
/// {
///   "success": true,
///   "userId": "user_123",
///   "dbConnected": true,
///   "serverTime": "2025-12-21T19:00:00.123456Z",
///   "message": "Protected route accessed successfully"
/// }
/// ```
///
/// - **Error (401)**: No identity
/// - **Error (500)**: Database unreachable (`dbConnected: false`) or any other failure
pub async fn protected_route(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
) -> Result<Json<ProtectedResponse>, AppError> {
    let user_id = identity
        .map(|Extension(identity)| identity.user_id)
        .filter(|user_id| !user_id.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let server_time = state.db.server_time().await.map_err(|err| {
        tracing::error!(error = %err, user_id = %user_id, "Error in protected route");
        AppError::from(err)
    })?;

    Ok(Json(ProtectedResponse {
        success: true,
        user_id,
        db_connected: true,
        server_time,
        message: "Protected route accessed successfully",
    }))
}
