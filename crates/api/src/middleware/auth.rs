//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use incidents_core::error::CoreError;
use incidents_core::types::DbId;
use incidents_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated actor extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token only identifies the user: the account row is re-read on every
/// request, so deactivation and staff changes apply immediately. Any handler
/// taking an `AuthUser` rejects unauthenticated requests with 401 before it
/// runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    /// Whether the actor is privileged (staff).
    pub is_staff: bool,
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

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Account is no longer active".into(),
                ))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            is_staff: user.is_staff,
        })
    }
}
