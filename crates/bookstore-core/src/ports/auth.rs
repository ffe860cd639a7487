//! Authentication, credential and signed-token ports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by an access credential.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: i32,
    pub email: String,
    pub roles: Vec<String>,
}

/// Issues the bearer credential returned by register and login.
pub trait TokenService: Send + Sync {
    fn generate_token(
        &self,
        user_id: i32,
        email: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError>;

    /// Signature, issuer and expiry are all checked.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// One-way storage of account passwords.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Failures while issuing or checking credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}

/// What a signed, time-limited token may be used for.
///
/// Tokens are bound to one purpose so a password-reset link can never
/// verify an email address and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

/// Contents of a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub subject_id: i32,
    pub issued_at: DateTime<Utc>,
    pub purpose: TokenPurpose,
}

impl TokenPayload {
    pub fn now(subject_id: i32, purpose: TokenPurpose) -> Self {
        Self {
            subject_id,
            issued_at: Utc::now(),
            purpose,
        }
    }
}

/// Signed token verification failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature is valid but the token outlived its expiry.
    #[error("token expired")]
    Expired,

    /// Bad signature, malformed token or wrong purpose.
    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token processing failed: {0}")]
    Internal(String),
}
