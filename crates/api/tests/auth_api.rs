//! HTTP-level integration tests for login.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_json, TEST_PASSWORD};
use incidents_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let (user, _) = create_user(&pool, "carol", true).await;

    let body = json!({ "username": "carol", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["expires_in"], 15 * 60);
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert_eq!(json["data"]["user"]["username"], "carol");
    assert_eq!(json["data"]["user"]["is_staff"], true);
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn issued_token_authenticates_requests(pool: PgPool) {
    create_user(&pool, "alice", false).await;

    let body = json!({ "username": "alice", "password": TEST_PASSWORD });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    let json = body_json(response).await;
    let token = json["data"]["access_token"].as_str().unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/v1/incidents/", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_401(pool: PgPool) {
    create_user(&pool, "alice", false).await;

    let body = json!({ "username": "alice", "password": "not-the-password" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid username or password"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_user_is_401(pool: PgPool) {
    let body = json!({ "username": "ghost", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_user_is_403(pool: PgPool) {
    let (user, _) = create_user(&pool, "dave", false).await;
    assert!(UserRepo::deactivate(&pool, user.id).await.unwrap());

    let body = json!({ "username": "dave", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_user_with_wrong_password_is_401(pool: PgPool) {
    let (user, _) = create_user(&pool, "dave", false).await;
    assert!(UserRepo::deactivate(&pool, user.id).await.unwrap());

    let body = json!({ "username": "dave", "password": "not-the-password" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid username or password"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn null_character_in_username_is_401(pool: PgPool) {
    create_user(&pool, "alice", false).await;

    let body = json!({ "username": "ali\u{0}ce", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
