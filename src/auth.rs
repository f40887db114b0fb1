//! Session token verification.
//!
//! Sign-in happens at an external identity provider. This module only checks
//! the session token it issues, found either in an `Authorization: Bearer`
//! header or in the session cookie, and turns its claims into an [`Identity`].

use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{
    config::Config,
    models::identity::{Identity, SessionClaims},
};

/// Errors raised while setting up token verification.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("AUTH_JWT_KEY is empty")]
    EmptyKey,

    #[error("Invalid verification key: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
}

/// Resolves the identity behind a request, if there is one.
pub trait IdentityProvider: Send + Sync {
    /// Returns `None` when the request carries no valid session.
    fn authenticate(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// [`IdentityProvider`] that verifies signed session JWTs.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
    session_cookie: String,
}

impl JwtIdentityProvider {
    /// Build a provider from a verification key.
    ///
    /// A PEM-encoded public key selects RS256; any other value is used as an
    /// HS256 shared secret.
    ///
    /// # Errors
    ///
    /// - `EmptyKey` if `key` is blank
    /// - `InvalidKey` if `key` looks like PEM but cannot be parsed
    pub fn new(
        key: &str,
        issuer: Option<&str>,
        session_cookie: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AuthError::EmptyKey);
        }

        let (decoding_key, algorithm) = if key.starts_with("-----BEGIN") {
            (DecodingKey::from_rsa_pem(key.as_bytes())?, Algorithm::RS256)
        } else {
            (DecodingKey::from_secret(key.as_bytes()), Algorithm::HS256)
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_nbf = true;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            decoding_key,
            validation,
            session_cookie: session_cookie.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        Self::new(
            &config.auth_jwt_key,
            config.auth_issuer.as_deref(),
            config.auth_session_cookie.clone(),
        )
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn authenticate(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = extract_session_token(headers, &self.session_cookie)?;

        match self.verify(&token) {
            Ok(claims) => claims.into_identity(),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected session token");
                None
            }
        }
    }
}

/// Find the session token: the bearer token wins over the cookie.
fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
