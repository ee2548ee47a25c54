// HTTP handlers for user and session endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::auth::middleware::{AuthenticatedUser, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, UpdateBioRequest, UserProfile};
use crate::auth::token::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;

/// Handler for POST /api/v1/users
/// Registers a new user account
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserProfile),
        (status = 400, description = "Invalid input data", body = String, example = json!({"statusCode": 400, "message": "Request validation failed", "success": false})),
        (status = 409, description = "Email or username already taken", body = String, example = json!({"statusCode": 409, "message": "User already exists", "success": false}))
    ),
    tag = "users"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), ApiError> {
    tracing::debug!("Registering new user: {}", request.email);

    let profile = state.auth_service.register(request).await?;

    tracing::info!("Successfully registered user with id: {}", profile.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, profile, "User created successfully")),
    ))
}

/// Handler for POST /api/v1/users/login
/// Authenticates a user and sets the session cookies
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Wrong password", body = String, example = json!({"statusCode": 401, "message": "Invalid password", "success": false})),
        (status = 404, description = "Unknown email", body = String, example = json!({"statusCode": 404, "message": "User not found", "success": false}))
    ),
    tag = "users"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    tracing::debug!("Login attempt for: {}", request.email);

    let session = state.auth_service.login(request).await?;

    let access_cookie = Cookie::build((ACCESS_TOKEN_COOKIE, session.access_token.clone()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(ACCESS_TOKEN_TTL_SECS))
        .path("/")
        .build();

    // The refresh cookie is only marked Secure in production; development
    // clients talk plain HTTP
    let refresh_cookie = Cookie::build((REFRESH_TOKEN_COOKIE, session.refresh_token.clone()))
        .http_only(true)
        .secure(state.config.is_production)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(REFRESH_TOKEN_TTL_SECS))
        .path("/")
        .build();

    let jar = jar.add(access_cookie).add(refresh_cookie);

    tracing::info!("User {} logged in", session.user.id);
    Ok((jar, Json(ApiResponse::new(StatusCode::OK, session, "Login successful"))))
}

/// Handler for PUT /api/v1/users/bio
/// Updates the authenticated user's bio
#[utoipa::path(
    put,
    path = "/api/v1/users/bio",
    request_body = UpdateBioRequest,
    responses(
        (status = 200, description = "Bio updated successfully", body = UserProfile),
        (status = 400, description = "Missing or oversized bio", body = String, example = json!({"statusCode": 400, "message": "Bio is required", "success": false})),
        (status = 401, description = "Not authenticated", body = String, example = json!({"statusCode": 401, "message": "User not authenticated", "success": false}))
    ),
    tag = "users"
)]
pub async fn update_bio_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateBioRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    tracing::debug!("Updating bio for user {}", user.user_id);

    let profile = state.auth_service.update_bio(user.user_id, request).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK, profile, "Bio updated successfully")))
}
