// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Access tokens live for 40 minutes
pub const ACCESS_TOKEN_TTL_SECS: i64 = 40 * 60;
/// Refresh tokens live for 7 days
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,       // user id
    pub iat: i64,        // issued at timestamp
    pub exp: i64,        // expiration timestamp
}

/// Token service for JWT operations
///
/// Access and refresh tokens are signed with independent secrets; a token
/// of one kind never verifies as the other. Verification is stateless and
/// runs with zero clock leeway.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
}

impl TokenService {
    /// Create a new TokenService from the two signing secrets
    pub fn new(access_secret: String, refresh_secret: String) -> Self {
        Self {
            access_secret,
            refresh_secret,
        }
    }

    /// Issue an access token (40 minutes)
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        Self::issue(user_id, ACCESS_TOKEN_TTL_SECS, &self.access_secret)
    }

    /// Issue a refresh token (7 days)
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        Self::issue(user_id, REFRESH_TOKEN_TTL_SECS, &self.refresh_secret)
    }

    /// Verify an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, &self.access_secret)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        Self::verify(token, &self.refresh_secret)
    }

    fn issue(user_id: Uuid, ttl_secs: i64, secret: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + ttl_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Internal helper to verify any token
    ///
    /// Every failure mode (bad signature, expiry, garbage input) collapses
    /// into the same `InvalidToken`; the cause is only logged.
    fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Token verification failed: {}", e);
            AuthError::InvalidToken
        })
    }
}
