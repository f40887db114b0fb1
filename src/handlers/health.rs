//! Health check endpoint for liveness probes.
//!
//! Public: the auth middleware never rejects it.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Value the liveness query returns when the database answers normally.
const HEALTH_SENTINEL: i32 = 1;

/// Health check response.
///
/// Returns service status and database connectivity.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status: "healthy" or "unhealthy"
    pub status: &'static str,

    /// Database connection status: "connected" or "disconnected"
    pub database: &'static str,

    /// Failure detail, only present when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// ISO-8601 timestamp taken when the response was built
    pub timestamp: String,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2025-12-21T19:00:00.000Z"
/// }
/// ```
///
/// If the query succeeds but returns an unexpected value, `database` is
/// "disconnected" while `status` stays "healthy".
///
/// # Response (503 Service Unavailable)
///
/// ```json
/// {
///   "status": "unhealthy",
///   "database": "disconnected",
///   "error": "pool timed out while waiting for an open connection",
///   "timestamp": "2025-12-21T19:00:00.000Z"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.health_check().await {
        Ok(sentinel) => {
            let database = if sentinel == HEALTH_SENTINEL {
                "connected"
            } else {
                "disconnected"
            };

            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy",
                    database,
                    error: None,
                    timestamp: now_iso8601(),
                }),
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");

            let message = err.to_string();
            let error = if message.is_empty() {
                "Unknown error".to_string()
            } else {
                message
            };

            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: "disconnected",
                    error: Some(error),
                    timestamp: now_iso8601(),
                }),
            )
        }
    }
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
