/// Error types for Blog Service
///
/// This module defines all error types that can occur in the blog-service.
/// Errors are converted to `{success: false, message}` HTTP responses, the
/// body shape every client of this API expects.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input
    Validation(String),

    /// Missing, invalid or expired credential
    Unauthorized(String),

    /// Referenced entity absent
    NotFound(String),

    /// The media host rejected or failed an upload
    UploadFailed(String),

    /// The generation backend stayed overloaded through every retry
    GenerationOverloaded(String),

    /// Database operation failed
    Database(String),

    /// Unclassified internal error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Unauthorized(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::UploadFailed(msg) => write!(f, "Failed to upload image: {}", msg),
            AppError::GenerationOverloaded(msg) => write!(f, "{}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UploadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GenerationOverloaded(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}

/// Convert a JSON body deserialization failure into the standard error shape
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}

/// Convert a path segment deserialization failure into the standard error shape
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
