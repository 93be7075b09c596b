/// Configuration management for Blog Service
///
/// All configuration comes from environment variables (with a `.env` file
/// loaded in development). Values with safe defaults fall back; credentials
/// and secrets are required and fail startup when absent.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Token signing configuration
    pub auth: AuthConfig,
    /// Static admin credentials
    pub admin: AdminConfig,
    /// Image host (upload + delivery) configuration
    pub media: MediaConfig,
    /// Text-generation backend configuration
    pub generation: GenerationConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or "*"
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret the admin tokens are signed with
    pub jwt_secret: String,
}

/// The single admin account, configured statically. Login compares against
/// these values and issues a signed token; there are no user records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

/// Image host configuration (ImageKit-style upload API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Upload API endpoint
    pub upload_endpoint: String,
    /// Private API key (basic-auth username on upload)
    pub private_key: String,
    /// Public delivery URL endpoint, e.g. `https://ik.example.com/demo`
    pub url_endpoint: String,
    /// Folder assets are stored under
    pub folder: String,
}

/// Text-generation backend configuration (Gemini-style REST API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key
    pub api_key: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BLOG_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "*".to_string(),
                };
                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/quickblog".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig {
                jwt_secret: std::env::var("JWT_SECRET")
                    .map_err(|_| "JWT_SECRET must be set".to_string())?,
            },
            admin: AdminConfig {
                email: std::env::var("ADMIN_EMAIL")
                    .map_err(|_| "ADMIN_EMAIL must be set".to_string())?,
                password: std::env::var("ADMIN_PASSWORD")
                    .map_err(|_| "ADMIN_PASSWORD must be set".to_string())?,
            },
            media: MediaConfig {
                upload_endpoint: std::env::var("IMAGEKIT_UPLOAD_ENDPOINT").unwrap_or_else(|_| {
                    "https://upload.imagekit.io/api/v1/files/upload".to_string()
                }),
                private_key: std::env::var("IMAGEKIT_PRIVATE_KEY")
                    .map_err(|_| "IMAGEKIT_PRIVATE_KEY must be set".to_string())?,
                url_endpoint: std::env::var("IMAGEKIT_URL_ENDPOINT")
                    .map_err(|_| "IMAGEKIT_URL_ENDPOINT must be set".to_string())?,
                folder: std::env::var("IMAGEKIT_FOLDER").unwrap_or_else(|_| "/blogs".to_string()),
            },
            generation: GenerationConfig {
                base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta".to_string()
                }),
                model: std::env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
                api_key: std::env::var("GEMINI_API_KEY")
                    .map_err(|_| "GEMINI_API_KEY must be set".to_string())?,
            },
        })
    }

    /// True when running with APP_ENV=production
    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}
