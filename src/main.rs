//! Session Gate Server - Main Application Entry Point
//!
//! Serves a public health probe and an authenticated route, both backed by
//! PostgreSQL.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (lazy connection pool)
//! - **Authentication**: Session JWTs issued by an external identity provider
//! - **Format**: JSON responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Set up session token verification
//! 4. Build HTTP router with routes and middleware
//! 5. Serve on the configured port until Ctrl+C or SIGTERM

use std::sync::Arc;

use session_gate_server::{
    app, auth::JwtIdentityProvider, config, db, state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config)?;
    tracing::info!(
        host = %config.database_host(),
        max_connections = config.db_max_connections,
        "Database pool created"
    );

    let identity_provider = JwtIdentityProvider::from_config(&config)?;
    tracing::info!(
        issuer = config.auth_issuer.as_deref().unwrap_or("<any>"),
        "Session verification configured"
    );

    let state = AppState::new(
        Arc::new(db::PgDatabase::new(pool)),
        Arc::new(identity_provider),
    )?;
    let app = app::build_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
