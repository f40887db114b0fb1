// Shared helpers for the router integration tests.
//
// The router is built with the real middleware and a real JWT identity
// provider, but with a canned `Database` so no PostgreSQL is needed.

#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use session_gate_server::{
    app::build_router, auth::JwtIdentityProvider, db::Database,
    models::identity::SessionClaims, state::AppState,
};
use tower::ServiceExt; // for oneshot()

pub const TEST_SECRET: &str = "integration-test-secret";

pub type Reply<T> = fn() -> Result<T, sqlx::Error>;

/// `Database` returning fixed results and counting how often it was queried.
pub struct MockDatabase {
    health: Reply<i32>,
    server_time: Reply<DateTime<Utc>>,
    calls: AtomicUsize,
}

impl MockDatabase {
    pub fn new(health: Reply<i32>, server_time: Reply<DateTime<Utc>>) -> Self {
        Self {
            health,
            server_time,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn healthy() -> Self {
        Self::new(|| Ok(1), || Ok(fixed_server_time()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for MockDatabase {
    async fn health_check(&self) -> Result<i32, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.health)()
    }

    async fn server_time(&self) -> Result<DateTime<Utc>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.server_time)()
    }
}

pub fn fixed_server_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 21, 19, 0, 0).unwrap()
}

/// Router wired to the given database.
pub fn router(db: Arc<MockDatabase>) -> Router {
    let provider = JwtIdentityProvider::new(TEST_SECRET, None, "__session").unwrap();
    let state = AppState::new(db, Arc::new(provider)).unwrap();
    build_router(state)
}

/// Signed session token for `user_id`, valid for five minutes.
pub fn session_token(user_id: &str) -> String {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        sid: Some("sess_test".to_string()),
        iss: None,
        exp: Utc::now().timestamp() + 300,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Status and parsed JSON body of a response.
pub async fn json_response(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}
