//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `AUTH_JWT_KEY` (required): session token verification key, either a PEM
///   public key (RS256) or a shared secret (HS256)
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `DB_ACQUIRE_TIMEOUT_SECS` (optional): pool acquire timeout, defaults to 5
/// - `AUTH_ISSUER` (optional): expected `iss` claim of session tokens
/// - `AUTH_SESSION_COOKIE` (optional): session cookie name, defaults to `__session`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_acquire_timeout")]
    pub db_acquire_timeout_secs: u64,

    pub auth_jwt_key: String,

    #[serde(default)]
    pub auth_issuer: Option<String>,

    #[serde(default = "default_session_cookie")]
    pub auth_session_cookie: String,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

/// Cookie the hosted sign-in flow stores the session token in.
fn default_session_cookie() -> String {
    "__session".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (`DATABASE_URL`, `AUTH_JWT_KEY`)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names are converted automatically: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Database host for log output, without credentials.
    pub fn database_host(&self) -> String {
        url::Url::parse(&self.database_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .unwrap_or_else(|| "<unparseable>".to_string())
    }
}
