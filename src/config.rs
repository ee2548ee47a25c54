// Application configuration loaded from the environment

/// Runtime configuration, read once at startup
///
/// Secrets are mandatory; the server must not come up with a missing or
/// empty signing key. Media upload settings are optional and the API runs
/// without them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub is_production: bool,
    pub media_upload_url: Option<String>,
    pub media_upload_preset: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Panics when a required variable is missing; startup is the only
    /// caller and has nothing sensible to fall back to.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
        let access_token_secret =
            std::env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set in environment");
        let refresh_token_secret =
            std::env::var("REFRESH_TOKEN_SECRET").expect("REFRESH_TOKEN_SECRET must be set in environment");

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid port number");

        let is_production = std::env::var("APP_ENV").map(|env| env == "production").unwrap_or(false);

        let media_upload_url = std::env::var("MEDIA_UPLOAD_URL").ok();
        let media_upload_preset = std::env::var("MEDIA_UPLOAD_PRESET").ok();

        Config {
            database_url,
            host,
            port,
            access_token_secret,
            refresh_token_secret,
            is_production,
            media_upload_url,
            media_upload_preset,
        }
    }
}
