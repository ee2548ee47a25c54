mod auth;
mod config;
mod db;
mod error;
mod media;
mod posts;
mod response;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::models::{LoginRequest, LoginResponse, RegisterRequest, SessionUser, UpdateBioRequest, UserProfile};
use auth::repository::UserRepository;
use auth::service::AuthService;
use auth::token::TokenService;
use config::Config;
use media::HttpMediaStore;
use posts::models::{PostAuthor, PostResponse, ProfileSummary, UserPostsResponse};
use posts::repository::PostRepository;
use posts::service::PostService;

/// JSON bodies are small; uploads get their own larger limit
const MAX_JSON_BODY_BYTES: usize = 16 * 1024;
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::update_bio_handler,
        posts::handlers::create_post_handler,
        posts::handlers::get_all_posts_handler,
        posts::handlers::delete_post_handler,
        posts::handlers::get_user_posts_handler,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UpdateBioRequest,
            UserProfile,
            SessionUser,
            LoginResponse,
            PostResponse,
            PostAuthor,
            ProfileSummary,
            UserPostsResponse,
        )
    ),
    tags(
        (name = "users", description = "User registration, login and profile endpoints"),
        (name = "posts", description = "Post creation, feed and deletion endpoints")
    ),
    info(
        title = "Moments API",
        version = "1.0.0",
        description = "RESTful API for a minimal social posting service",
        contact(
            name = "API Support",
            email = "support@momentsapi.com"
        )
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    config: Config,
    tokens: TokenService,
    auth_service: AuthService,
    post_service: PostService,
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> TokenService {
        state.tokens.clone()
    }
}

/// Wire repositories and services onto the pool and configuration
fn build_state(db: PgPool, config: Config) -> AppState {
    let tokens = TokenService::new(
        config.access_token_secret.clone(),
        config.refresh_token_secret.clone(),
    );

    let auth_service = AuthService::new(UserRepository::new(db.clone()), tokens.clone());

    let media_store = Arc::new(HttpMediaStore::new(
        config.media_upload_url.clone(),
        config.media_upload_preset.clone(),
    ));
    let post_service = PostService::new(PostRepository::new(db), media_store);

    AppState {
        config,
        tokens,
        auth_service,
        post_service,
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    // Browser clients send cookies, so origins are listed explicitly;
    // a wildcard cannot be combined with credentials
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://localhost:3000"),
        ]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/v1/users", post(auth::handlers::register_handler))
        .route("/api/v1/users/login", post(auth::handlers::login_handler))
        .route("/api/v1/users/bio", put(auth::handlers::update_bio_handler))
        .route(
            "/api/v1/posts",
            post(posts::handlers::create_post_handler)
                .get(posts::handlers::get_all_posts_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/posts/:id", delete(posts::handlers::delete_post_handler))
        .route("/api/v1/posts/user/:username", get(posts::handlers::get_user_posts_handler))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_BYTES))
        .with_state(state)
}

/// Resolve once Ctrl+C is received
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    // This enables the error!, warn!, info!, debug!, and trace! macros
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Moments API - Starting...");

    // Get configuration from environment variables
    let config = Config::from_env();

    // Create database connection pool and probe it
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    db::check_connection(&db_pool)
        .await
        .expect("Failed to connect to database");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let addr = format!("{}:{}", config.host, config.port);
    let app = create_router(build_state(db_pool.clone(), config));

    // Start the Axum server
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Moments API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Drain the pool so in-flight writes settle before exit
    db_pool.close().await;
    tracing::info!("Moments API stopped");
}

#[cfg(test)]
mod tests;
