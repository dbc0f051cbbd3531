//! Structured audit events.
//!
//! Every state-changing request emits exactly one event here, under the
//! `incidents::audit` target. Events carry identifiers and classification
//! only: titles, descriptions, comment bodies and passwords are never
//! recorded.

use incidents_core::types::DbId;
use incidents_db::models::comment::Comment;
use incidents_db::models::incident::Incident;

use crate::middleware::auth::AuthUser;

pub fn incident_created(actor: &AuthUser, incident: &Incident) {
    tracing::info!(
        target: "incidents::audit",
        user = %actor.username,
        user_id = actor.user_id,
        incident_id = incident.id,
        severity = incident.severity.as_str(),
        category = incident.category.as_str(),
        "Incident created"
    );
}

pub fn comment_added(actor: &AuthUser, comment: &Comment) {
    tracing::info!(
        target: "incidents::audit",
        user = %actor.username,
        user_id = actor.user_id,
        incident_id = comment.incident_id,
        comment_id = comment.id,
        is_internal = comment.is_internal,
        "Comment added to incident"
    );
}

pub fn incident_updated(actor: &AuthUser, incident: &Incident) {
    tracing::info!(
        target: "incidents::audit",
        user = %actor.username,
        user_id = actor.user_id,
        incident_id = incident.id,
        status = incident.status.as_str(),
        severity = incident.severity.as_str(),
        category = incident.category.as_str(),
        "Incident updated"
    );
}

pub fn incident_deleted(actor: &AuthUser, incident_id: DbId) {
    tracing::info!(
        target: "incidents::audit",
        user = %actor.username,
        user_id = actor.user_id,
        incident_id,
        "Incident deleted"
    );
}

pub fn login_succeeded(user_id: DbId, username: &str) {
    tracing::info!(target: "incidents::audit", user = %username, user_id, "Login succeeded");
}

pub fn login_failed(username: &str, reason: &'static str) {
    tracing::warn!(target: "incidents::audit", user = %username, reason, "Login failed");
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use incidents_core::incident::{Category, Severity, Status};

    use super::*;

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let sink = Capture::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = sink.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn actor(is_staff: bool) -> AuthUser {
        AuthUser {
            user_id: 3,
            username: "alice".to_string(),
            is_staff,
        }
    }

    fn incident() -> Incident {
        let now = chrono::Utc::now();
        Incident {
            id: 7,
            title: "Confidential title".to_string(),
            description: "Confidential description text".to_string(),
            category: Category::Data,
            severity: Severity::High,
            status: Status::Open,
            reporter_id: Some(3),
            reporter_username: Some("alice".to_string()),
            is_anonymous: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn incident_event_carries_classification_not_text() {
        let out = capture(|| incident_created(&actor(false), &incident()));

        assert!(out.contains("Incident created"));
        assert!(out.contains("user=alice"));
        assert!(out.contains("incident_id=7"));
        assert!(out.contains("severity=\"HIGH\"") || out.contains("severity=HIGH"));
        assert!(out.contains("DATA"));
        assert!(!out.contains("Confidential"));
    }

    #[test]
    fn comment_event_never_contains_body() {
        let comment = Comment {
            id: 11,
            incident_id: 7,
            author_id: 3,
            author_username: "alice".to_string(),
            body: "password for the vault is hunter2".to_string(),
            is_internal: true,
            created_at: chrono::Utc::now(),
        };

        let out = capture(|| comment_added(&actor(true), &comment));

        assert!(out.contains("Comment added to incident"));
        assert!(out.contains("incident_id=7"));
        assert!(out.contains("is_internal=true"));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("vault"));
    }

    #[test]
    fn update_event_omits_text() {
        let out = capture(|| incident_updated(&actor(true), &incident()));
        assert!(out.contains("Incident updated"));
        assert!(out.contains("OPEN"));
        assert!(!out.contains("Confidential"));
    }
}
