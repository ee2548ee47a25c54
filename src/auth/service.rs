// Authentication service - business logic layer

use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    models::{LoginRequest, LoginResponse, RegisterRequest, SessionUser, UpdateBioRequest, UserProfile},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use crate::error::ApiError;

/// Longest bio accepted by the profile update
const MAX_BIO_CHARS: usize = 500;

/// Authentication service coordinating account and session operations
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, tokens: TokenService) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a new user
    ///
    /// This method:
    /// 1. Validates the request fields
    /// 2. Rejects an already-registered email
    /// 3. Hashes the password
    /// 4. Persists the user with a lowercased username
    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile, ApiError> {
        // 1. Validate request
        request.validate()?;

        // 2. Duplicate email check; the unique constraint still backs this up
        if self.user_repo.email_exists(&request.email).await? {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        // 3. Hash the password
        let password_hash = PasswordService::hash_password(&request.password)?;

        // 4. Usernames are stored lowercase
        let username = request.username.to_lowercase();

        let user = self
            .user_repo
            .create_user(&request.name, &request.email, &username, &request.bio, &password_hash)
            .await?;

        Ok(UserProfile::from(user))
    }

    /// Log a user in, producing the access/refresh token pair
    ///
    /// This method:
    /// 1. Validates the request fields
    /// 2. Looks up the account by email
    /// 3. Checks the password against the stored hash
    /// 4. Issues both tokens
    /// 5. Persists the refresh token before responding
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        // 1. Validate request
        request.validate()?;

        // 2. Look up the account; an unknown email is reported as such
        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        // 3. Password check
        if !PasswordService::verify_password(&request.password, &user.password_hash)? {
            return Err(ApiError::Unauthorized("Invalid password".to_string()));
        }

        // 4. Issue the token pair
        let access_token = self.tokens.issue_access_token(user.id)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        // 5. The single slot replaces any refresh token from an earlier login
        let updated = self.user_repo.set_refresh_token(user.id, &refresh_token).await?;
        if updated == 0 {
            return Err(ApiError::Internal(format!(
                "Failed to persist refresh token for user {}",
                user.id
            )));
        }

        Ok(LoginResponse {
            user: SessionUser::from(user),
            access_token,
            refresh_token,
        })
    }

    /// Update the authenticated user's bio
    ///
    /// The bio is checked by hand rather than through derive validation:
    /// a blank bio is rejected, the length cap applies to the raw input,
    /// and the stored value is trimmed.
    pub async fn update_bio(&self, user_id: Uuid, request: UpdateBioRequest) -> Result<UserProfile, ApiError> {
        let bio = request.bio.unwrap_or_default();

        if bio.trim().is_empty() {
            return Err(ApiError::BadRequest("Bio is required".to_string()));
        }
        if bio.chars().count() > MAX_BIO_CHARS {
            return Err(ApiError::BadRequest("Bio must be less than 500 characters".to_string()));
        }

        let user = self
            .user_repo
            .update_bio(user_id, bio.trim())
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserProfile::from(user))
    }
}
