//! Authentication and role extractors for Axum handlers.
//!
//! [`AuthUser`] extracts and validates the Bearer token; the `Require*`
//! wrappers additionally enforce a minimum role at the type level.

pub mod jwt;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bom_core::error::CoreError;
use bom_core::roles::Role;
use bom_core::types::Id;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Id,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = jwt::validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let role = Role::from_str(&claims.role).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Unknown role '{}' in token",
                claims.role
            )))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}

/// Requires an elevated role (admin or any moon team). Rejects with 403
/// Forbidden otherwise.
pub struct RequireElevated(pub AuthUser);

impl FromRequestParts<AppState> for RequireElevated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_elevated() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(RequireElevated(user))
    }
}

/// Requires the platform admin role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
