// Authentication module
// Provides JWT-based sessions, user accounts and the request auth gate

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, register_handler, update_bio_handler};
pub use middleware::{AuthenticatedUser, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, SessionUser, UpdateBioRequest, User, UserProfile};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::{Claims, TokenService};
