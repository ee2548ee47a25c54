// Authentication middleware for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{error::AuthError, token::TokenService};

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Authenticated user extractor for protected routes
///
/// The access token is read from the `access_token` cookie first, then from
/// the `Authorization: Bearer` header. Verification is purely cryptographic;
/// the user row is never loaded here.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = TokenService::from_ref(state);

        // Cookie wins when both carriers are present
        let token = token_from_cookie(parts)
            .or_else(|| token_from_bearer(parts))
            .ok_or_else(|| {
                debug!("No access token in cookie or Authorization header");
                AuthError::MissingToken
            })?;

        let claims = tokens.verify_access_token(&token)?;

        Ok(AuthenticatedUser { user_id: claims.sub })
    }
}

/// Read the access token from the request cookies
fn token_from_cookie(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Read the access token from the Authorization header
fn token_from_bearer(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::Request;
    use axum::response::IntoResponse;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use proptest::prelude::*;

    use crate::auth::token::Claims;

    // Helper to create test parts with Authorization header
    fn create_parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create test parts with a Cookie header
    fn create_parts_with_cookie(cookie_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::COOKIE, cookie_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create test parts carrying both token sources
    fn create_parts_with_cookie_and_auth(cookie_value: &str, auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::COOKIE, cookie_value)
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create test parts without credentials
    fn create_parts_without_auth() -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new(
            "access_secret_for_testing_purposes".to_string(),
            "refresh_secret_for_testing_purposes".to_string(),
        )
    }

    #[tokio::test]
    async fn test_valid_bearer_token_is_accepted() {
        let service = test_token_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));

        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_valid_cookie_token_is_accepted() {
        let service = test_token_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        let mut parts = create_parts_with_cookie(&format!("access_token={}", token));

        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_cookie_takes_precedence_over_header() {
        let service = test_token_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        let mut parts = create_parts_with_cookie_and_auth(
            &format!("access_token={}", token),
            "Bearer garbage-token",
        );

        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(result.is_ok(), "valid cookie should win over an invalid bearer token");
        assert_eq!(result.unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_invalid_cookie_fails_even_with_valid_bearer() {
        let service = test_token_service();

        let token = service.issue_access_token(Uuid::new_v4()).unwrap();
        let mut parts = create_parts_with_cookie_and_auth(
            "access_token=garbage-token",
            &format!("Bearer {}", token),
        );

        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_missing_credentials_are_rejected() {
        let service = test_token_service();
        let mut parts = create_parts_without_auth();

        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(matches!(result.unwrap_err(), AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        let malformed_headers = vec![
            "Bearer invalid_token",
            "Bearer not.a.valid.jwt",
            "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature",
        ];

        for auth_value in malformed_headers {
            let mut parts = create_parts_with_auth(auth_value);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

            assert!(result.is_err());
        }
    }

    #[tokio::test]
    async fn test_non_bearer_schemes_count_as_missing() {
        let service = test_token_service();

        let invalid_formats = vec![
            "InvalidFormat token",
            "token_without_bearer",
            "Basic dXNlcjpwYXNz",
        ];

        for auth_value in invalid_formats {
            let mut parts = create_parts_with_auth(auth_value);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

            assert!(matches!(result.unwrap_err(), AuthError::MissingToken));
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let service = test_token_service();

        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: Utc::now().timestamp() - 1000,
            exp: Utc::now().timestamp() - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("access_secret_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));
        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_token_does_not_open_the_gate() {
        let service = test_token_service();

        let token = service.issue_refresh_token(Uuid::new_v4()).unwrap();
        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));

        let result = AuthenticatedUser::from_request_parts(&mut parts, &service).await;

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_missing_and_invalid_rejections_look_identical() {
        let service = test_token_service();

        let mut missing_parts = create_parts_without_auth();
        let missing = AuthenticatedUser::from_request_parts(&mut missing_parts, &service)
            .await
            .unwrap_err()
            .into_response();

        let mut invalid_parts = create_parts_with_auth("Bearer garbage-token");
        let invalid = AuthenticatedUser::from_request_parts(&mut invalid_parts, &service)
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(missing.status(), invalid.status());

        let missing_body = to_bytes(missing.into_body(), usize::MAX).await.unwrap();
        let invalid_body = to_bytes(invalid.into_body(), usize::MAX).await.unwrap();
        assert_eq!(missing_body, invalid_body);
    }

    // Property-based tests using proptest

    proptest! {
        #[test]
        fn prop_valid_tokens_accepted(raw in any::<u128>()) {
            let service = test_token_service();
            let user_id = Uuid::from_u128(raw);

            let token = service.issue_access_token(user_id)?;
            let mut parts = create_parts_with_auth(&format!("Bearer {}", token));

            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(
                AuthenticatedUser::from_request_parts(&mut parts, &service)
            );

            prop_assert!(result.is_ok());
            prop_assert_eq!(result.unwrap().user_id, user_id);
        }

        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();

            let mut parts = create_parts_with_auth(&format!("Bearer {}", malformed));

            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(
                AuthenticatedUser::from_request_parts(&mut parts, &service)
            );

            prop_assert!(result.is_err());
        }
    }
}
