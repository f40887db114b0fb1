//! Error types and HTTP error response handling.
//!
//! This module defines the errors a request can end in and how they are
//! converted into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::db::is_connectivity_error;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and a fixed JSON body.
/// Database details are logged by the handler and never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No identity could be resolved for a request that needs one.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Authentication required")]
    Unauthorized,

    /// The database could not be reached.
    ///
    /// Returns HTTP 500 with `dbConnected: false`.
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(#[source] sqlx::Error),

    /// Any other failure while serving the request.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Internal error: {0}")]
    Internal(#[source] sqlx::Error),
}

/// Classify a database error into the response the client gets.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_connectivity_error(&err) {
            AppError::DatabaseUnavailable(err)
        } else {
            AppError::Internal(err)
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 `{ "error": "Unauthorized", "message": "Authentication required" }`
/// - `DatabaseUnavailable` → 500 `{ "error": "Database Error", "message": "...", "dbConnected": false }`
/// - `Internal` → 500 `{ "error": "Internal Server Error", "message": "..." }`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Unauthorized",
                    "message": "Authentication required"
                }),
            ),
            AppError::DatabaseUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Database Error",
                    "message": "Failed to connect to database",
                    "dbConnected": false
                }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal Server Error",
                    "message": "An unexpected error occurred"
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
