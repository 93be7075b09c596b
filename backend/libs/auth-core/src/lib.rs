/// Shared admin-token module for the QuickBlog backend
///
/// Provides signing and validation of the bearer credential the admin panel
/// uses. Tokens are HS256-signed with a shared secret and carry a short,
/// fixed lifetime; there is no refresh mechanism, an expired token means the
/// caller logs in again.
pub mod jwt;

pub use jwt::{
    generate_admin_token, initialize_token_secret, validate_token, AdminClaims,
    ADMIN_TOKEN_EXPIRY_HOURS,
};
