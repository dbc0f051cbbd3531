//! Route definitions for the incident views.
//!
//! Paths keep their trailing slash and are registered in full rather than
//! nested, so `/incidents/` and `/incidents` stay distinct.

use axum::routing::get;
use axum::Router;
use incidents_core::types::DbId;

use crate::handlers::incidents;
use crate::state::AppState;

/// Prefix under which [`api_routes`](super::api_routes) is served.
const API_PREFIX: &str = "/api/v1";

/// Absolute path of the incident list.
pub fn list_path() -> String {
    format!("{API_PREFIX}/incidents/")
}

/// Absolute path of one incident's detail view.
pub fn detail_path(id: DbId) -> String {
    format!("{API_PREFIX}/incidents/{id}/")
}

/// Routes merged into `/api/v1`.
///
/// ```text
/// GET  /incidents/           -> list_incidents
/// GET  /incidents/create/    -> create_form
/// POST /incidents/create/    -> create_incident
/// GET  /incidents/{id}/      -> incident_detail
/// POST /incidents/{id}/      -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incidents/", get(incidents::list_incidents))
        .route(
            "/incidents/create/",
            get(incidents::create_form).post(incidents::create_incident),
        )
        .route(
            "/incidents/{id}/",
            get(incidents::incident_detail).post(incidents::add_comment),
        )
}
