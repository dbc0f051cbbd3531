//! Incident model and listing filters.

use incidents_core::incident::{incident_display, Category, Severity, Status};
use incidents_core::policy::reporter_visible;
use incidents_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An incident row joined with its reporter's username.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Incident {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    #[sqlx(try_from = "String")]
    pub severity: Severity,
    #[sqlx(try_from = "String")]
    pub status: Status,
    /// `None` once hidden from a viewer by [`Incident::for_viewer`].
    pub reporter_id: Option<DbId>,
    pub reporter_username: Option<String>,
    pub is_anonymous: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Incident {
    /// The incident as `viewer_id` may see it: an anonymous report drops its
    /// reporter unless the viewer is staff or filed it.
    pub fn for_viewer(mut self, viewer_id: DbId, viewer_is_privileged: bool) -> Self {
        let viewer_is_reporter = self.reporter_id == Some(viewer_id);
        if !reporter_visible(self.is_anonymous, viewer_is_reporter, viewer_is_privileged) {
            self.reporter_id = None;
            self.reporter_username = None;
        }
        self
    }

    /// Short display form, e.g. `"Server down (Medium)"`.
    pub fn display(&self) -> String {
        incident_display(&self.title, self.severity)
    }
}

/// Filters for the staff incident listing. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct IncidentFilter {
    pub category: Option<Category>,
    pub severity: Option<Severity>,
    pub status: Option<Status>,
    pub is_anonymous: Option<bool>,
    /// Free text matched against title, description and reporter username.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
