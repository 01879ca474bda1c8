//! Password hashing and session tokens.
//!
//! Passwords are hashed with argon2 (random salt, default parameters) and
//! stored as PHC strings, so verifying a login never recovers the original
//! password. Session tokens are HS256 JWTs carrying the user id and role,
//! valid for 24 hours from issuance.
//!
//! A token is only proof of *who* the caller is. Whether that user may reach
//! an admin route is decided per request by re-reading their current role
//! from the store (see `routes::require_admin`), so a role downgrade takes
//! effect immediately instead of waiting for token expiry.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Role;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The token is missing, malformed, expired, or carries a bad signature.
    #[error("invalid token")]
    InvalidToken,

    /// Token creation failed.
    #[error("token creation failed: {0}")]
    TokenCreation(String),
}

/// Claims payload of a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,

    /// Role at issuance time. Informational only; admin gating re-reads the
    /// current role from the store.
    pub role: Role,

    /// Expiry as a UTC unix timestamp.
    pub exp: u64,
}

/// Hashes a password with argon2 and a freshly generated salt.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if the underlying hasher fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AuthError::Hash(err.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
///
/// Returns `false` both for a genuine mismatch and for an unparseable hash;
/// a login attempt cannot distinguish the two.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Issues a session token for the given user, expiring `lifetime_secs` from
/// now.
///
/// # Errors
///
/// Returns [`AuthError::TokenCreation`] if encoding fails.
pub fn issue_token(
    user_id: &str,
    role: Role,
    secret: &str,
    lifetime_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: now + lifetime_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AuthError::TokenCreation(err.to_string()))
}

/// Validates a session token and returns its claims.
///
/// Expiry is enforced with zero leeway: a token is rejected strictly after
/// its `exp` timestamp.
///
/// # Errors
///
/// Returns [`AuthError::InvalidToken`] for any signature, format, or expiry
/// failure.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// Returns `None` when the header does not carry a bearer token.
#[must_use]
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
