//! Integration tests for user registration and Basic authentication.
//!
//! These tests require a `PostgreSQL` server reachable through `DATABASE_URL`.
//!
//! Run with: cargo test -p autolot-integration-tests -- --ignored

use autolot_integration_tests::{TEST_PASSWORD, TEST_USERNAME, TestContext, send};
use reqwest::{StatusCode, header::WWW_AUTHENTICATE};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_register_without_credentials(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, body) = send(
        ctx.client
            .post(ctx.url("/api/users"))
            .json(&json!({ "username": "fulano", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "fulano");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // The new user can authenticate right away
    let response = ctx
        .client
        .get(ctx.url("/api/users"))
        .basic_auth("fulano", Some("s3cret"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_user_is_rejected(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, body) = send(
        ctx.client
            .post(ctx.url("/api/users"))
            .json(&json!({ "username": TEST_USERNAME, "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User already exists.");
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_list_users(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, body) = send(ctx.get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("users is an array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], TEST_USERNAME);
    assert!(users[0]["id"].is_i64());
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_wrong_password_is_unauthorized(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    for (username, password) in [(TEST_USERNAME, "wrong"), ("nobody", TEST_PASSWORD)] {
        let response = ctx
            .client
            .get(ctx.url("/api/customers"))
            .basic_auth(username, Some(password))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(WWW_AUTHENTICATE));
    }
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_readiness_reports_database(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let response = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_padded_username_is_not_an_alias(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let padded = format!(" {TEST_USERNAME}");
    let (status, body) = send(
        ctx.client
            .post(ctx.url("/api/users"))
            .json(&json!({ "username": padded, "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "username cannot start or end with whitespace");

    let response = ctx
        .client
        .get(ctx.url("/api/customers"))
        .basic_auth(&padded, Some(TEST_PASSWORD))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
