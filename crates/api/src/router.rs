//! Shared application router builder.
//!
//! [`build_app_router`] is used by both the server binary and the integration
//! tests, so both run the same middleware stack.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{ConfigError, ServerConfig};
use crate::routes;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout
/// 6. Panic recovery (catch panics, return 500)
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(config)?;
    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// Build the CORS middleware layer from server configuration.
///
/// An origin that is not a valid header value is a configuration error.
pub fn build_cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origins = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                expected: "origin",
                value: o.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::jwt::JwtConfig;

    fn config_with_origins(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            jwt: JwtConfig {
                secret: "test".into(),
                access_token_expiry_mins: 60,
            },
        }
    }

    #[test]
    fn valid_origins_build() {
        let config = config_with_origins(&["http://localhost:5173", "https://example.org"]);
        assert!(build_cors_layer(&config).is_ok());
    }

    #[test]
    fn invalid_origin_is_a_config_error() {
        let config = config_with_origins(&["http://bad\norigin"]);
        assert_matches!(
            build_cors_layer(&config),
            Err(ConfigError::Invalid { name: "CORS_ORIGINS", .. })
        );
    }
}
