/// Admin token signing and validation
///
/// The blog service has a single credential scheme: a shared-secret HS256
/// token issued at login and presented as `Authorization: Bearer <token>`.
/// The secret is loaded from the environment once at startup and held in a
/// `OnceCell`; it is immutable for the lifetime of the process.
///
/// ## Security Design
///
/// - **HS256 only**: the algorithm is pinned, a token claiming any other
///   algorithm fails validation
/// - **No hardcoded secret**: the secret comes from configuration
/// - **Self-contained**: claims carry issue and expiry times, the server
///   keeps no session state
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Admin tokens live for one hour; after that the caller must log in again.
pub const ADMIN_TOKEN_EXPIRY_HOURS: i64 = 1;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Claims carried by an admin token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    /// Admin email address (the configured admin account)
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

// ============================================================================
// Key Storage
// ============================================================================

/// Keys are derived from the shared secret once at startup and never
/// modified. OnceCell gives thread-safe initialization without locks.
static TOKEN_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static TOKEN_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize token keys from the shared secret
///
/// Must be called during application startup before any token operation.
/// Can only be called once; subsequent calls return an error.
pub fn initialize_token_secret(secret: &str) -> Result<()> {
    if secret.trim().is_empty() {
        return Err(anyhow!("Token secret must not be empty"));
    }

    TOKEN_ENCODING_KEY
        .set(EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("Token encoding key already initialized"))?;

    TOKEN_DECODING_KEY
        .set(DecodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("Token decoding key already initialized"))?;

    Ok(())
}

fn get_encoding_key() -> Result<&'static EncodingKey> {
    TOKEN_ENCODING_KEY.get().ok_or_else(|| {
        anyhow!("Token secret not initialized. Call initialize_token_secret() during startup.")
    })
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    TOKEN_DECODING_KEY.get().ok_or_else(|| {
        anyhow!("Token secret not initialized. Call initialize_token_secret() during startup.")
    })
}

// ============================================================================
// Token Generation
// ============================================================================

/// Generate a new admin token for the given email
///
/// Returns an HS256-signed token valid for [`ADMIN_TOKEN_EXPIRY_HOURS`].
pub fn generate_admin_token(email: &str) -> Result<String> {
    let now = Utc::now();
    let claims = AdminClaims {
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ADMIN_TOKEN_EXPIRY_HOURS)).timestamp(),
    };

    sign_claims(&claims)
}

/// Sign an arbitrary claims value
///
/// Exposed so tests can craft tokens with controlled expiry; production
/// callers go through [`generate_admin_token`].
pub fn sign_claims(claims: &AdminClaims) -> Result<String> {
    let encoding_key = get_encoding_key()?;
    encode(&Header::new(TOKEN_ALGORITHM), claims, encoding_key)
        .map_err(|e| anyhow!("Failed to sign admin token: {e}"))
}

// ============================================================================
// Token Validation
// ============================================================================

/// Validate and decode an admin token
///
/// Verifies the HS256 signature against the initialized secret and checks
/// expiry. The `token` argument is the raw token, without a "Bearer " prefix.
pub fn validate_token(token: &str) -> Result<TokenData<AdminClaims>> {
    let decoding_key = get_decoding_key()?;

    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = true;

    decode::<AdminClaims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

// ============================================================================
// Tests
// ============================================================================
