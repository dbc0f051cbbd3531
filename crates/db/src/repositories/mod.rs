//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Every value that originates from a request
//! reaches the database as a bound parameter.

pub mod comment_repo;
pub mod incident_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use incident_repo::IncidentRepo;
pub use user_repo::UserRepo;
