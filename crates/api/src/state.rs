use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and cloned per request (the pool and config are
/// reference counted).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: incidents_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
