//! Authentication port.
//!
//! Sign-in itself happens at the external identity provider; the server's
//! only job is validating the bearer token forwarded on each request.

use serde::{Deserialize, Serialize};

/// Claims carried by a validated bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity provider's stable subject for the user.
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub exp: i64,
}

/// Token service trait for bearer-token operations.
pub trait TokenService: Send + Sync {
    /// Mint a token for a subject. Used by tooling and tests; in production
    /// tokens come from the identity provider sharing the same secret.
    fn generate_token(&self, claims: &TokenClaims) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
