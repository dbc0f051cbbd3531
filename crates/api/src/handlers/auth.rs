//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use incidents_core::error::CoreError;
use incidents_core::types::DbId;
use incidents_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::audit;
use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub is_staff: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and return an access token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    // 1. Find user by username. No stored name contains NUL.
    let user = if input.username.contains('\0') {
        None
    } else {
        UserRepo::find_by_username(&state.pool, &input.username).await?
    };
    let Some(user) = user else {
        audit::login_failed(&input.username, "unknown_user");
        return Err(invalid_credentials());
    };

    // 2. Verify password. Account state is only revealed to its owner.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        audit::login_failed(&user.username, "bad_password");
        return Err(invalid_credentials());
    }

    // 3. Check if the account is active.
    if !user.is_active {
        audit::login_failed(&user.username, "inactive");
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 4. Issue the token.
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.username, user.is_staff, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    audit::login_succeeded(user.id, &user.username);

    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token,
            expires_in: jwt.access_token_expiry_mins * 60,
            user: UserInfo {
                id: user.id,
                username: user.username,
                is_staff: user.is_staff,
            },
        },
    }))
}
