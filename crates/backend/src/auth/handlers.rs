//! Authentication HTTP handlers.

use axum::{Extension, Json};

use super::types::{AuthUser, AuthUserResponse};

/// Get current authenticated user info.
pub async fn auth_me(Extension(user): Extension<AuthUser>) -> Json<AuthUserResponse> {
    Json(AuthUserResponse {
        email: user.email,
        name: user.name,
    })
}
