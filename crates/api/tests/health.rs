//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, create_user, get, get_auth};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_path_requires_trailing_slash(pool: PgPool) {
    let (_alice, token) = create_user(&pool, "alice", false).await;
    let response = get_auth(common::build_test_app(pool), "/api/v1/incidents", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/incidents/")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
