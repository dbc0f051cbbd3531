//! Comment model and DTOs.

use incidents_core::incident::comment_display;
use incidents_core::policy::InternalFlag;
use incidents_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::incident::Incident;

/// A comment row joined with its author's username.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub incident_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub body: String,
    pub is_internal: bool,
    pub created_at: Timestamp,
}

impl Comment {
    /// Short display form, e.g. `"Comment by alice on Server down (Medium)"`.
    pub fn display(&self, incident: &Incident) -> String {
        comment_display(&self.author_username, &incident.display())
    }
}

impl InternalFlag for Comment {
    fn is_internal(&self) -> bool {
        self.is_internal
    }
}

/// DTO for inserting a comment. `is_internal` must already have been
/// decided by the internal-comment policy.
#[derive(Debug)]
pub struct CreateComment {
    pub incident_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub is_internal: bool,
}

/// Filters for the staff comment listing.
#[derive(Debug, Default, Deserialize)]
pub struct CommentFilter {
    pub is_internal: Option<bool>,
    /// Free text matched against body, author username and incident title.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
