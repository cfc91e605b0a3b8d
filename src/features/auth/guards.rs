//! Role-based authorization guards.
//!
//! Guards read the directory user that `resolve_user_middleware` placed in the
//! request extensions, so the role checked here is the stored role rather than
//! anything asserted by the token.

use crate::core::error::AppError;
use crate::features::users::models::{User, UserRole};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for administrator-only routes.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(admin): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        match user.role {
            UserRole::Admin => Ok(RequireAdmin(user.clone())),
            UserRole::Student => Err(AppError::Forbidden("Admin access required".to_string())),
        }
    }
}
