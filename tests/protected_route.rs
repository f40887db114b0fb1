// Integration tests for GET /api/protected and the auth middleware in front of it.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{
    MockDatabase, fixed_server_time, get, get_with_bearer, json_response, send, session_token,
};

#[tokio::test]
async fn signed_in_caller_gets_identity_and_server_time() {
    let app = common::router(Arc::new(MockDatabase::healthy()));
    let token = session_token("user_123");

    let (status, body) =
        json_response(send(app, get_with_bearer("/api/protected", &token)).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "success": true,
            "userId": "user_123",
            "dbConnected": true,
            "serverTime": fixed_server_time(),
            "message": "Protected route accessed successfully"
        })
    );
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let app = common::router(Arc::new(MockDatabase::healthy()));
    let request = Request::builder()
        .uri("/api/protected")
        .header(
            header::COOKIE,
            format!("theme=dark; __session={}", session_token("user_456")),
        )
        .body(Body::empty())
        .unwrap();

    let (status, body) = json_response(send(app, request).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "user_456");
}

#[tokio::test]
async fn missing_session_is_401_without_touching_database() {
    let db = Arc::new(MockDatabase::healthy());
    let app = common::router(db.clone());

    let (status, body) = json_response(send(app, get("/api/protected")).await).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Authentication required");
    assert_eq!(db.calls(), 0);
}

#[tokio::test]
async fn invalid_token_is_401() {
    let app = common::router(Arc::new(MockDatabase::healthy()));

    let response = send(app, get_with_bearer("/api/protected", "not-a-jwt")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_sub_paths_are_gated_before_routing() {
    let app = common::router(Arc::new(MockDatabase::healthy()));
    let response = send(app, get("/api/protected/settings")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::router(Arc::new(MockDatabase::healthy()));
    let token = session_token("user_123");
    let response = send(app, get_with_bearer("/api/protected/settings", &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn connectivity_failure_is_database_error() {
    let db = MockDatabase::new(
        || Ok(1),
        || {
            Err(sqlx::Error::Protocol(
                "connect ECONNREFUSED 127.0.0.1:5432".to_string(),
            ))
        },
    );
    let app = common::router(Arc::new(db));
    let token = session_token("user_123");

    let (status, body) =
        json_response(send(app, get_with_bearer("/api/protected", &token)).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database Error");
    assert_eq!(body["message"], "Failed to connect to database");
    assert_eq!(body["dbConnected"], false);
}

#[tokio::test]
async fn other_failures_are_internal_errors() {
    let db = MockDatabase::new(|| Ok(1), || Err(sqlx::Error::RowNotFound));
    let app = common::router(Arc::new(db));
    let token = session_token("user_123");

    let (status, body) =
        json_response(send(app, get_with_bearer("/api/protected", &token)).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Internal Server Error",
            "message": "An unexpected error occurred"
        })
    );
}

#[tokio::test]
async fn static_assets_bypass_the_middleware() {
    let app = common::router(Arc::new(MockDatabase::healthy()));

    // No route serves it, but it must not be rejected as unauthenticated either.
    let response = send(app, get("/logo.png")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
