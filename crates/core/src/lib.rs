//! Domain core for the incident reporting service.
//!
//! Zero internal dependencies: holds the shared id/timestamp types, the
//! classification enums, form validation and the internal-comment policy so
//! both the repository layer and the HTTP layer can use them.

pub mod error;
pub mod forms;
pub mod incident;
pub mod policy;
pub mod search;
pub mod types;
