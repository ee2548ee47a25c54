// HTTP handlers for post endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::media;
use crate::posts::models::{CreatePostRequest, PostResponse, UserPostsResponse};
use crate::response::ApiResponse;
use crate::AppState;

/// Query parameters for listing posts
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    tracing::debug!("Malformed multipart request: {}", err);
    ApiError::BadRequest("Malformed multipart request".to_string())
}

/// Handler for POST /api/v1/posts
/// Creates a post from a multipart form with `content`, `imageUrl` and an
/// optional `image` file
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body(content = String, content_type = "multipart/form-data", description = "Form fields: content, imageUrl, image (file)"),
    responses(
        (status = 201, description = "Post created successfully", body = PostResponse),
        (status = 400, description = "Missing content or image", body = String, example = json!({"statusCode": 400, "message": "Image is required", "success": false})),
        (status = 401, description = "Not authenticated", body = String, example = json!({"statusCode": 401, "message": "User not authenticated", "success": false}))
    ),
    tag = "posts"
)]
pub async fn create_post_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    tracing::debug!("Creating new post for user {}", user.user_id);

    let mut request = CreatePostRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "content" => request.content = Some(field.text().await.map_err(multipart_error)?),
            "imageUrl" => request.image_url = Some(field.text().await.map_err(multipart_error)?),
            "image" => {
                let file_name = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(multipart_error)?;
                request.image_file = Some(media::save_temp_file(&data, file_name.as_deref()).await?);
            }
            _ => {}
        }
    }

    let post = state.post_service.create_post(user.user_id, request).await?;

    tracing::info!("Successfully created post with id: {}", post.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, post, "Post created successfully")),
    ))
}

/// Handler for GET /api/v1/posts
/// Retrieves all posts newest first, optionally filtered by author
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(
        ("userId" = Option<Uuid>, Query, description = "Restrict the feed to one author")
    ),
    responses(
        (status = 200, description = "Posts fetched successfully", body = Vec<PostResponse>)
    ),
    tag = "posts"
)]
pub async fn get_all_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<ApiResponse<Vec<PostResponse>>>, ApiError> {
    tracing::debug!("Fetching posts (author filter: {:?})", query.user_id);

    let posts = state.post_service.list_posts(query.user_id).await?;

    tracing::debug!("Retrieved {} posts", posts.len());
    Ok(Json(ApiResponse::new(StatusCode::OK, posts, "Posts fetched successfully")))
}

/// Handler for DELETE /api/v1/posts/:id
/// Deletes a post; only its author may do so
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted successfully"),
        (status = 403, description = "Caller does not own the post", body = String, example = json!({"statusCode": 403, "message": "You are not authorized to delete this post", "success": false})),
        (status = 404, description = "Post not found", body = String, example = json!({"statusCode": 404, "message": "Post not found", "success": false}))
    ),
    tag = "posts"
)]
pub async fn delete_post_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    tracing::debug!("Deleting post {} for user {}", post_id, user.user_id);

    state.post_service.delete_post(post_id, user.user_id).await?;

    tracing::info!("Successfully deleted post with id: {}", post_id);
    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        serde_json::Value::Null,
        "Post deleted successfully",
    )))
}

/// Handler for GET /api/v1/posts/user/:username
/// Retrieves a user's public profile and posts, case-insensitively
#[utoipa::path(
    get,
    path = "/api/v1/posts/user/{username}",
    params(
        ("username" = String, Path, description = "Author username, any casing")
    ),
    responses(
        (status = 200, description = "User posts fetched successfully", body = UserPostsResponse),
        (status = 404, description = "Unknown username", body = String, example = json!({"statusCode": 404, "message": "User not found", "success": false}))
    ),
    tag = "posts"
)]
pub async fn get_user_posts_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserPostsResponse>>, ApiError> {
    tracing::debug!("Fetching posts for username: {}", username);

    let response = state.post_service.list_user_posts(&username).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        response,
        "User posts fetched successfully",
    )))
}
