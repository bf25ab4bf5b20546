//! Identity-provider token handling.
//!
//! Tokens are HS256 JWTs whose subject is the patient's email. When the
//! provider's issuer or audience is configured, tokens must carry a matching
//! `iss` / `aud` claim.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::types::{AuthConfig, Claims};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime of {0} days is out of range")]
    InvalidLifetime(i64),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Validation rules for tokens from the configured provider.
fn provider_validation(config: &AuthConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    validation
}

/// Sign a token carrying the configured issuer and audience.
///
/// Production tokens come from the identity provider; this mints
/// development sessions with the same secret.
pub fn create_token(
    config: &AuthConfig,
    email: &str,
    name: Option<String>,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = Duration::try_days(config.token_duration_days)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::InvalidLifetime(config.token_duration_days))?;

    let claims = Claims {
        sub: email.to_string(),
        name,
        iat: now.timestamp(),
        exp: exp.timestamp(),
        iss: config.issuer.clone(),
        aud: config.audience.clone().map(serde_json::Value::String),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Check signature, expiry, issuer and audience; return the claims.
pub fn validate_token(config: &AuthConfig, token: &str) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &provider_validation(config),
    )?;

    Ok(token_data.claims)
}
