// Error handling module for the Moments API
// Provides the centralized error type and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::auth::error::AuthError;

/// Main error type for the API
/// All handlers should return Result<T, ApiError>
///
/// Each variant maps to one HTTP status code. Variants carrying a String
/// send that message to the client verbatim; database and internal errors
/// are logged in full and replaced with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Request validation failures, reported per field
    #[error("Request validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// Database operation errors
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// Internal failures whose details must stay out of responses
    #[error("{0}")]
    Internal(String),
}

/// Wire format shared by every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Always false; mirrors the success envelope
    pub success: bool,

    /// Field-level validation issues, omitted from JSON when None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    /// Convert ApiError to an HTTP response
    ///
    /// Logging happens here, at a level matching severity:
    /// - error!: database and internal errors
    /// - warn!: auth failures and conflicts
    /// - debug!: expected client errors (validation, not found)
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, message, None)
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                (StatusCode::UNAUTHORIZED, message, None)
            }
            ApiError::Forbidden(message) => {
                warn!("Forbidden access attempt: {}", message);
                (StatusCode::FORBIDDEN, message, None)
            }
            ApiError::NotFound(message) => {
                debug!("Resource not found: {}", message);
                (StatusCode::NOT_FOUND, message, None)
            }
            ApiError::Conflict(message) => {
                warn!("Conflict error: {}", message);
                (StatusCode::CONFLICT, message, None)
            }
            ApiError::Validation(validation_errors) => {
                debug!("Validation error: {:?}", validation_errors);

                let details = serde_json::to_value(&validation_errors).unwrap_or(serde_json::json!({}));
                (
                    StatusCode::BAD_REQUEST,
                    "Request validation failed".to_string(),
                    Some(details),
                )
            }
            ApiError::Database(db_error) => {
                // Log the full database error internally; clients get a
                // generic message
                error!("Database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
            ApiError::Internal(internal_msg) => {
                error!("Internal error: {}", internal_msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            status_code: status.as_u16(),
            message,
            success: false,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Convert auth-gate errors into the shared error type
///
/// Missing and invalid tokens collapse into one indistinguishable 401; the
/// distinction only exists in the logs.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized("User not authenticated".to_string())
            }
            AuthError::TokenCreation(msg) => ApiError::Internal(msg),
            AuthError::PasswordHash(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_envelope_shape() {
        let response = ApiError::NotFound("User not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "User not found");
        assert_eq!(body["success"], false);
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_validation_envelope_lists_offending_fields() {
        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 10))]
            bio: String,
        }

        let errors = Probe { bio: "short".to_string() }.validate().unwrap_err();
        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Request validation failed");
        assert_eq!(body["success"], false);
        assert!(body["errors"]["bio"].is_array());
    }

    #[tokio::test]
    async fn test_internal_details_are_not_exposed() {
        let response = ApiError::Internal("connection pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_database_details_are_not_exposed() {
        let response = ApiError::from(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_missing_and_invalid_tokens_are_indistinguishable() {
        let missing = ApiError::from(AuthError::MissingToken).into_response();
        let invalid = ApiError::from(AuthError::InvalidToken).into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

        let missing_body = body_json(missing).await;
        let invalid_body = body_json(invalid).await;
        assert_eq!(missing_body, invalid_body);
    }
}
