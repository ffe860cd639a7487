//! Signed, time-limited tokens for email verification and password reset.
//!
//! Both functions are pure: the secret and clock inputs come from the caller.
//! Tokens are HS256 JWTs carrying `{sub, purpose, iat, exp}`; they are not
//! stored anywhere and stay valid until `exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use bookstore_core::ports::{TokenError, TokenPayload, TokenPurpose};

pub const DEFAULT_SECRET: &str = "a-very-secret-key-for-development";

#[derive(Debug, Serialize, Deserialize)]
struct SignedClaims {
    sub: String,
    purpose: TokenPurpose,
    iat: i64,
    exp: i64,
}

/// Sign `payload`, valid for `expires_in` after its `issued_at`.
pub fn sign_token(
    secret: &str,
    payload: &TokenPayload,
    expires_in: Duration,
) -> Result<String, TokenError> {
    let claims = SignedClaims {
        sub: payload.subject_id.to_string(),
        purpose: payload.purpose,
        iat: payload.issued_at.timestamp(),
        exp: (payload.issued_at + expires_in).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Internal(e.to_string()))
}

/// Verify signature, expiry and purpose, returning the signed payload.
pub fn verify_token(
    secret: &str,
    token: &str,
    purpose: TokenPurpose,
) -> Result<TokenPayload, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SignedClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Invalid(e.to_string()),
        _ => TokenError::Internal(e.to_string()),
    })?;

    let claims = data.claims;
    if claims.purpose != purpose {
        return Err(TokenError::Invalid("token issued for another purpose".to_string()));
    }

    let subject_id = claims
        .sub
        .parse()
        .map_err(|_| TokenError::Internal(format!("unexpected token subject {:?}", claims.sub)))?;
    let issued_at = DateTime::<Utc>::from_timestamp(claims.iat, 0)
        .ok_or_else(|| TokenError::Internal("issued-at out of range".to_string()))?;

    Ok(TokenPayload {
        subject_id,
        issued_at,
        purpose: claims.purpose,
    })
}

/// Read `SECRET_KEY`, warning when the development default is in use.
pub fn secret_from_env() -> String {
    match std::env::var("SECRET_KEY") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            warn_default_secret("SECRET_KEY");
            DEFAULT_SECRET.to_string()
        }
    }
}

pub(crate) fn warn_default_secret(var: &str) {
    let is_production = std::env::var("RUST_ENV")
        .map(|v| v == "production" || v == "prod")
        .unwrap_or(false);

    if is_production {
        tracing::error!("SECURITY: Using default signing secret in production! Set {var}.");
    } else {
        tracing::warn!("Using default signing secret. Set {var} for production use.");
    }
}
