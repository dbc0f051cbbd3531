//! Visibility policy for comments and reporters.
//!
//! Internal comments are staff-only. A non-staff author asking for an
//! internal comment is silently downgraded to a public one, and non-staff
//! viewers never receive internal comments. Neither case is an error.
//! Anonymous incidents hide their reporter from other non-staff users.

/// Anything carrying an internal/public flag.
pub trait InternalFlag {
    fn is_internal(&self) -> bool;
}

/// The internal flag to store for a comment.
///
/// Only a privileged actor can keep `requested_internal`; everyone else gets
/// `false`.
pub fn decide_internal_flag(requested_internal: bool, actor_is_privileged: bool) -> bool {
    requested_internal && actor_is_privileged
}

/// Whether the actor may be offered the internal checkbox at all.
pub fn can_mark_internal(actor_is_privileged: bool) -> bool {
    actor_is_privileged
}

/// The comments a viewer may see, in their original order.
pub fn visible_comments<T: InternalFlag>(comments: Vec<T>, viewer_is_privileged: bool) -> Vec<T> {
    if viewer_is_privileged {
        return comments;
    }
    comments.into_iter().filter(|c| !c.is_internal()).collect()
}

/// Whether a viewer may learn who filed an incident.
///
/// Anonymous reports reveal their reporter only to staff and to the
/// reporter themselves.
pub fn reporter_visible(
    is_anonymous: bool,
    viewer_is_reporter: bool,
    viewer_is_privileged: bool,
) -> bool {
    !is_anonymous || viewer_is_reporter || viewer_is_privileged
}
