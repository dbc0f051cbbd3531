//! Handlers for the incident list, the submission form and the detail view.
//!
//! Every handler takes an [`AuthUser`] first, so unauthenticated requests are
//! rejected with 401 before the handler runs.

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use incidents_core::error::CoreError;
use incidents_core::forms::{
    comment_form_fields, incident_form_fields, CommentForm, FieldDescription, IncidentForm,
};
use incidents_core::policy::{can_mark_internal, decide_internal_flag, visible_comments};
use incidents_core::search::validate_term;
use incidents_core::types::DbId;
use incidents_db::models::comment::{Comment, CreateComment};
use incidents_db::models::incident::Incident;
use incidents_db::repositories::{CommentRepo, IncidentRepo};
use serde::{Deserialize, Serialize};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::routes::incidents::{detail_path, list_path};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the incident list.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

/// Payload of `GET /incidents/`.
#[derive(Debug, Serialize)]
pub struct IncidentListing {
    pub incidents: Vec<Incident>,
    /// The search term as submitted, or an empty string.
    pub search_term: String,
}

/// Payload of `GET /incidents/create/`.
#[derive(Debug, Serialize)]
pub struct IncidentFormDescription {
    pub fields: Vec<FieldDescription>,
}

/// Payload of `GET /incidents/{id}/`.
#[derive(Debug, Serialize)]
pub struct IncidentDetail {
    pub incident: Incident,
    /// e.g. `"Server down (Medium)"`.
    pub display: String,
    /// Comments the viewer may see, oldest first.
    pub comments: Vec<Comment>,
    pub comment_form: Vec<FieldDescription>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn ensure_incident_exists(state: &AppState, id: DbId) -> AppResult<Incident> {
    IncidentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Incident",
            id,
        }))
}

/// GET /api/v1/incidents/
///
/// All incidents, newest first. A non-blank `q` narrows the list to
/// incidents whose title or description contains it.
pub async fn list_incidents(
    user: AuthUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<DataResponse<IncidentListing>>> {
    validate_term(params.q.as_deref())?;
    let incidents = IncidentRepo::list(&state.pool, params.q.as_deref())
        .await?
        .into_iter()
        .map(|incident| incident.for_viewer(user.user_id, user.is_staff))
        .collect();

    Ok(Json(DataResponse {
        data: IncidentListing {
            incidents,
            search_term: params.q.unwrap_or_default(),
        },
    }))
}

/// GET /api/v1/incidents/create/
pub async fn create_form(_user: AuthUser) -> Json<DataResponse<IncidentFormDescription>> {
    Json(DataResponse {
        data: IncidentFormDescription {
            fields: incident_form_fields(),
        },
    })
}

/// POST /api/v1/incidents/create/
///
/// Validates the submission, files it under the current actor and redirects
/// to the list with 303 See Other.
pub async fn create_incident(
    user: AuthUser,
    State(state): State<AppState>,
    JsonBody(form): JsonBody<IncidentForm>,
) -> AppResult<Redirect> {
    let cleaned = form.clean()?;

    let incident = IncidentRepo::create(&state.pool, user.user_id, &cleaned).await?;
    audit::incident_created(&user, &incident);

    Ok(Redirect::to(&list_path()))
}

/// GET /api/v1/incidents/{id}/
pub async fn incident_detail(
    user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
) -> AppResult<Json<DataResponse<IncidentDetail>>> {
    let incident = ensure_incident_exists(&state, id).await?;
    let comments = CommentRepo::list_for_incident(&state.pool, incident.id).await?;

    Ok(Json(DataResponse {
        data: IncidentDetail {
            display: incident.display(),
            incident: incident.for_viewer(user.user_id, user.is_staff),
            comments: visible_comments(comments, user.is_staff),
            comment_form: comment_form_fields(can_mark_internal(user.is_staff)),
        },
    }))
}

/// POST /api/v1/incidents/{id}/
///
/// Adds a comment and redirects back to the detail view with 303 See Other.
/// A non-staff request for an internal comment is stored as public.
pub async fn add_comment(
    user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath<DbId>,
    JsonBody(form): JsonBody<CommentForm>,
) -> AppResult<Redirect> {
    let incident = ensure_incident_exists(&state, id).await?;
    let cleaned = form.clean()?;

    let input = CreateComment {
        incident_id: incident.id,
        author_id: user.user_id,
        body: cleaned.body,
        is_internal: decide_internal_flag(cleaned.requested_internal, user.is_staff),
    };
    let comment = CommentRepo::create(&state.pool, &input).await?;
    audit::comment_added(&user, &comment);

    Ok(Redirect::to(&detail_path(incident.id)))
}
