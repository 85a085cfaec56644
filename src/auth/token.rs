//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`crate::config::AppConfig`]. Claims carry the identity (id, email, name,
//! role) plus issued-at and expiry; verification fails closed, returning
//! `None` for anything malformed, expired or signed with a different secret.
//! There is no revocation list: expiry is the only way a token stops being
//! valid.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AdminUser, Role};

/// Decoded payload of a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity's document id.
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret fixed at startup.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issues a signed token for an identity, expiring after the configured
    /// time-to-live.
    pub fn issue(&self, id: Uuid, user: &AdminUser) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Validates signature and expiry. Returns `None` on any failure so
    /// callers treat every bad token uniformly as unauthenticated.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

/// Server-side revocation is a deliberate no-op: tokens are self-contained
/// and there is no denylist, so a logged-out token stays valid until its
/// natural expiry. Kept as an explicit seam should a denylist ever be added.
pub fn revoke(_token: &str) {}
