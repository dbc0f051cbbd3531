//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching what the
//! repository selects, plus the DTOs used for inserts and filtered listings.

pub mod comment;
pub mod incident;
pub mod user;
