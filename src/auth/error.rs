// Authentication error types

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Errors produced while issuing or checking credentials
///
/// Token problems carry no detail; the HTTP mapping in [`ApiError`]
/// sends the same 401 for a missing and an invalid token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token generation error: {0}")]
    TokenCreation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        let missing = AuthError::MissingToken.into_response();
        let invalid = AuthError::InvalidToken.into_response();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_credential_machinery_errors_map_to_internal() {
        let creation = AuthError::TokenCreation("boom".to_string()).into_response();
        let hashing = AuthError::PasswordHash("boom".to_string()).into_response();

        assert_eq!(creation.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hashing.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
