//! Incident reporting API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, routes)
//! so integration tests, the server binary and the admin CLI share them.

pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
