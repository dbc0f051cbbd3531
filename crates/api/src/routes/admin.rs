//! Route definitions for staff administration.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires a staff actor.
///
/// ```text
/// GET    /incidents        -> list_incidents
/// PATCH  /incidents/{id}   -> update_incident
/// DELETE /incidents/{id}   -> delete_incident
/// GET    /comments         -> list_comments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incidents", get(admin::list_incidents))
        .route(
            "/incidents/{id}",
            patch(admin::update_incident).delete(admin::delete_incident),
        )
        .route("/comments", get(admin::list_comments))
}
