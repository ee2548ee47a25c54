// Post data models and DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::path::PathBuf;
use utoipa::ToSchema;
use uuid::Uuid;

/// Post database model
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub image_url: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Post row joined with its author's public columns
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub image_url: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_username: String,
}

/// Public author fields embedded in post responses
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

/// Post response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub content: String,
    pub image_url: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author: PostAuthor,
}

impl PostResponse {
    /// Combine a bare post row with separately fetched author fields
    pub fn from_parts(post: Post, author: PostAuthor) -> Self {
        Self {
            id: post.id,
            content: post.content,
            image_url: post.image_url,
            author_id: post.author_id,
            created_at: post.created_at,
            author,
        }
    }
}

impl From<PostWithAuthor> for PostResponse {
    fn from(row: PostWithAuthor) -> Self {
        Self {
            id: row.id,
            content: row.content,
            image_url: row.image_url,
            author_id: row.author_id,
            created_at: row.created_at,
            author: PostAuthor {
                id: row.author_id,
                name: row.author_name,
                username: row.author_username,
            },
        }
    }
}

/// Public profile fields returned by the posts-by-username endpoint
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub bio: String,
}

/// Response DTO for GET /api/v1/posts/user/{username}
#[derive(Debug, Serialize, ToSchema)]
pub struct UserPostsResponse {
    pub user: ProfileSummary,
    pub posts: Vec<PostResponse>,
}

/// Assembled input for creating a post, collected from the multipart form
///
/// `image_url` comes from the `imageUrl` text field; `image_file` is the
/// spooled upload from the `image` file field, when one was attached.
#[derive(Debug, Default)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub image_file: Option<PathBuf>,
}
