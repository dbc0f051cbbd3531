pub mod admin;
pub mod auth;
pub mod health;
pub mod incidents;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
///
/// /incidents/                       list (?q=)
/// /incidents/create/                form description (GET), create (POST)
/// /incidents/{id}/                  detail (GET), add comment (POST)
///
/// /admin/incidents                  filtered list (staff only)
/// /admin/incidents/{id}             update (PATCH), delete (DELETE)
/// /admin/comments                   filtered list (staff only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(incidents::router())
        .nest("/admin", admin::router())
}
