/// Blog Service Library
///
/// Backend for the QuickBlog platform: an admin API for writing and
/// publishing posts and moderating reader comments, plus the public API the
/// blog front-end consumes.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for the admin and public surfaces
/// - `models`: Data structures for posts and comments
/// - `services`: Business logic (publishing, moderation, generation, media)
/// - `db`: Content store trait and its Postgres implementation
/// - `middleware`: Bearer-token authentication for admin routes
/// - `error`: Error taxonomy and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
