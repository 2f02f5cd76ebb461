//! Bearer-token signing and validation.
//!
//! Tokens are HS256-signed and carry issuer, audience, and expiry claims.
//! Validation checks all three against the configured parameters; a token
//! failing any check never reaches a handler.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// JWT claim set carried by every accepted token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (caller identity)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Claims for a token issued now, expiring `expiration_hours` from now,
    /// stamped with the configured issuer and audience.
    pub fn new(subject: impl Into<String>, config: &JwtConfig, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let expires = now + Duration::hours(expiration_hours);

        Self {
            sub: subject.into(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        }
    }
}

/// Sign a token for the given subject with the configured secret.
///
/// Production tokens come from the external identity provider; this exists
/// for the `token` CLI subcommand and the test suite.
pub fn generate_token(
    subject: &str,
    config: &JwtConfig,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(subject, config, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("failed to sign token: {e}"),
    })
}

/// Validate a token's signature, issuer, audience, and expiry.
///
/// Returns the decoded claims on success, `Unauthorized` on any failure.
pub fn validate_token(token: &str, config: &JwtConfig) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let message = match e.kind() {
            ErrorKind::ExpiredSignature => "token has expired".to_string(),
            ErrorKind::InvalidIssuer => "token issuer mismatch".to_string(),
            ErrorKind::InvalidAudience => "token audience mismatch".to_string(),
            ErrorKind::InvalidSignature => "invalid token signature".to_string(),
            ErrorKind::InvalidToken => "invalid token".to_string(),
            _ => format!("token validation failed: {e}"),
        };
        AppError::Unauthorized { message }
    })
}
