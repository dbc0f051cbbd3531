//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated actor from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Requires a staff (privileged) actor.

pub mod auth;
pub mod rbac;
