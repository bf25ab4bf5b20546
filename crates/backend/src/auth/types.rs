//! Auth-related types and configuration.

use serde::{Deserialize, Serialize};

// Re-export shared types for convenience
pub use shared_types::AuthUserResponse;

/// JWT Claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// User display name
    pub name: Option<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issuer, checked when `AuthConfig::issuer` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience, a string or array; checked when `AuthConfig::audience` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,
}

/// Validated user from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub name: Option<String>,
}

/// Auth configuration loaded from environment
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Empty means every authenticated user is allowed
    pub allowed_emails: Vec<String>,
    pub token_duration_days: i64,
    pub cookie_name: String,
    /// Expected `iss` claim of provider tokens
    pub issuer: Option<String>,
    /// Expected `aud` claim of provider tokens
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// Required env vars:
    /// - `JWT_SECRET`: Secret shared with the identity provider for HS256 tokens
    ///
    /// Optional env vars:
    /// - `ALLOWED_EMAILS`: Comma-separated allowlist of user emails
    /// - `AUTH_COOKIE_NAME`: Session cookie name (default `auth_token`)
    /// - `JWT_ISSUER`: Required `iss` claim
    /// - `JWT_AUDIENCE`: Required `aud` claim
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        if jwt_secret.is_empty() {
            return Err("JWT_SECRET cannot be empty".to_string());
        }

        let allowed_emails = std::env::var("ALLOWED_EMAILS")
            .map(|raw| parse_email_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            jwt_secret,
            allowed_emails,
            token_duration_days: 7,
            cookie_name: std::env::var("AUTH_COOKIE_NAME")
                .unwrap_or_else(|_| "auth_token".to_string()),
            issuer: non_empty_env("JWT_ISSUER"),
            audience: non_empty_env("JWT_AUDIENCE"),
        })
    }

    /// Check if an email address may use the dashboard.
    pub fn is_email_allowed(&self, email: &str) -> bool {
        self.allowed_emails.is_empty() || self.allowed_emails.contains(&email.to_lowercase())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
