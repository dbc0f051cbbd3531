//! Staff-only access extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use incidents_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a staff actor. Rejects with 401 when unauthenticated and 403
/// Forbidden for everyone else.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_staff {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff access required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
