//! Staff-only incident and comment administration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use incidents_core::error::CoreError;
use incidents_core::forms::IncidentUpdateForm;
use incidents_core::search::validate_term;
use incidents_core::types::DbId;
use incidents_db::models::comment::{Comment, CommentFilter};
use incidents_db::models::incident::{Incident, IncidentFilter};
use incidents_db::repositories::{CommentRepo, IncidentRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn incident_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Incident",
        id,
    })
}

/// GET /api/v1/admin/incidents
pub async fn list_incidents(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<IncidentFilter>,
) -> AppResult<Json<DataResponse<Vec<Incident>>>> {
    validate_term(filter.q.as_deref())?;
    let incidents = IncidentRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: incidents }))
}

/// PATCH /api/v1/admin/incidents/{id}
///
/// Update status, severity or category.
pub async fn update_incident(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
    JsonBody(form): JsonBody<IncidentUpdateForm>,
) -> AppResult<Json<DataResponse<Incident>>> {
    let cleaned = form.clean()?;

    let incident = IncidentRepo::update(&state.pool, id, &cleaned)
        .await?
        .ok_or_else(|| incident_not_found(id))?;
    audit::incident_updated(&staff, &incident);

    Ok(Json(DataResponse { data: incident }))
}

/// DELETE /api/v1/admin/incidents/{id}
///
/// Removes the incident together with its comments.
pub async fn delete_incident(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<StatusCode> {
    if !IncidentRepo::delete(&state.pool, id).await? {
        return Err(incident_not_found(id));
    }
    audit::incident_deleted(&staff, id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/comments
pub async fn list_comments(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<CommentFilter>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    validate_term(filter.q.as_deref())?;
    let comments = CommentRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: comments }))
}
