// Database repository for user accounts

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::models::User;
use crate::error::ApiError;

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user
    ///
    /// Unique-constraint violations on email or username surface as
    /// `Conflict`, which also covers registrations racing past the
    /// duplicate pre-check.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        username: &str,
        bio: &str,
        password_hash: &str,
    ) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, username, bio, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, username, bio, password_hash, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(username)
        .bind(bio)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Check for unique constraint violations
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return match db_err.constraint() {
                        Some("users_username_key") => {
                            ApiError::Conflict("Username already taken".to_string())
                        }
                        _ => ApiError::Conflict("User already exists".to_string()),
                    };
                }
            }
            ApiError::Database(e)
        })?;

        Ok(user)
    }

    /// Find a user by exact email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, username, bio, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email is already registered
    pub async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let exists: Option<bool> = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.unwrap_or(false))
    }

    /// Store the latest refresh token, replacing any previous one
    ///
    /// Returns the number of rows touched; zero means the user is gone.
    pub async fn set_refresh_token(&self, user_id: Uuid, token: &str) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE users SET refresh_token = $1, updated_at = NOW() WHERE id = $2")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Update a user's bio, returning the updated row
    pub async fn update_bio(&self, user_id: Uuid, bio: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET bio = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, email, username, bio, password_hash, created_at, updated_at
            "#,
        )
        .bind(bio)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
