//! Authentication module for JWTs issued by the clinic's identity provider.
//!
//! This module provides:
//! - JWT token creation and validation
//! - `require_auth` middleware for protecting routes
//! - Email allowlist validation

mod handlers;
pub mod jwt;
mod middleware;
pub mod types;

pub use handlers::auth_me;
pub use middleware::{extract_auth_user, require_auth};
pub use types::{AuthConfig, AuthUser};
