//! Identity model for authenticated requests.
//!
//! Identities are never stored. The identity provider builds one from the
//! session token on each request and the auth middleware attaches it to the
//! request extensions.

use serde::{Deserialize, Serialize};

/// The authenticated caller of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque user identifier issued by the identity provider (the token's `sub`)
    pub user_id: String,

    /// Session the token belongs to, when the provider includes one
    pub session_id: Option<String>,
}

/// Claims carried by a session token.
///
/// Only the claims this service reads are listed; anything else in the token
/// is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user identifier
    pub sub: String,

    /// Session identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Issuer, checked against `AUTH_ISSUER` when that is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Expiry (seconds since the Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Turn verified claims into an identity.
    ///
    /// Returns `None` for an empty subject: a token without a user is not an
    /// authenticated request.
    pub fn into_identity(self) -> Option<Identity> {
        if self.sub.trim().is_empty() {
            return None;
        }

        Some(Identity {
            user_id: self.sub,
            session_id: self.sid,
        })
    }
}
