// Database repository for posts

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::models::{Post, PostAuthor, PostWithAuthor, ProfileSummary};

/// Post repository for database operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new PostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new post
    pub async fn create(&self, author_id: Uuid, content: &str, image_url: &str) -> Result<Post, ApiError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (content, image_url, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, image_url, author_id, created_at
            "#,
        )
        .bind(content)
        .bind(image_url)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Find a post by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, content, image_url, author_id, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// List posts newest first, optionally restricted to one author
    pub async fn find_all(&self, author_id: Option<Uuid>) -> Result<Vec<PostWithAuthor>, ApiError> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.content, p.image_url, p.author_id, p.created_at,
                   u.name AS author_name, u.username AS author_username
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE $1::uuid IS NULL OR p.author_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Delete a post
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetch the public author fields for a user
    pub async fn find_author(&self, user_id: Uuid) -> Result<Option<PostAuthor>, ApiError> {
        let author = sqlx::query_as::<_, PostAuthor>("SELECT id, name, username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(author)
    }

    /// Fetch a user's public profile by exact username
    ///
    /// Callers lowercase the input; stored usernames are lowercase already.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<ProfileSummary>, ApiError> {
        let user = sqlx::query_as::<_, ProfileSummary>(
            "SELECT id, name, username, bio FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
