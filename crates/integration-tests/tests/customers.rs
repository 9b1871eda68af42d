//! Integration tests for the customer endpoints.
//!
//! These tests require a `PostgreSQL` server reachable through `DATABASE_URL`.
//!
//! Run with: cargo test -p autolot-integration-tests -- --ignored

use autolot_integration_tests::{TestContext, send};
use reqwest::StatusCode;
use serde_json::json;
use sqlx::PgPool;

const DOC: &str = "39987456321";

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_customer_round_trip(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let created = ctx.create_customer(DOC, "Fulano").await;
    assert_eq!(created["doc"], DOC);
    assert_eq!(created["name"], "Fulano");
    assert_eq!(created["sale_opp"], true);
    assert!(created["id"].is_i64());

    let (status, body) = send(ctx.get(&format!("/api/customer/{DOC}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = send(ctx.get("/api/customers")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([created]));
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_client_supplied_sale_opp_is_ignored(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, body) = send(ctx.post("/api/customers").json(&json!({
        "doc": DOC,
        "name": "Fulano",
        "sale_opp": false,
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sale_opp"], true);
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_doc_is_rejected(pool: PgPool) {
    let ctx = TestContext::new(pool).await;
    ctx.create_customer(DOC, "Fulano").await;

    let (status, body) = send(
        ctx.post("/api/customers")
            .json(&json!({ "doc": DOC, "name": "Ciclano" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], format!("Customer already exists: {DOC}"));
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_create_validates_fields(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, body) = send(ctx.post("/api/customers").json(&json!({ "doc": DOC }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Missing arguments.");

    let (status, body) = send(
        ctx.post("/api/customers")
            .json(&json!({ "doc": "", "name": "Fulano" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Missing arguments: doc cannot be empty");

    let (status, body) = send(
        ctx.post("/api/customers")
            .json(&json!({ "doc": "1".repeat(21), "name": "Fulano" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "doc must be at most 20 characters");
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_get_unknown_customer_is_not_found(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, body) = send(ctx.get("/api/customer/00000000000")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found: 00000000000");
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_update_changes_doc_and_moves_cars(pool: PgPool) {
    let ctx = TestContext::new(pool).await;
    ctx.create_customer(DOC, "Fulano").await;
    ctx.create_car(DOC, "blue", "sedan").await;

    let (status, body) = send(
        ctx.put(&format!("/api/customer/{DOC}"))
            .json(&json!({ "doc": "11122233344", "name": "Fulano de Tal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doc"], "11122233344");
    assert_eq!(body["name"], "Fulano de Tal");
    assert_eq!(body["sale_opp"], false);

    let (status, _) = send(ctx.get(&format!("/api/customer/{DOC}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, cars) = send(ctx.get("/api/car/11122233344")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cars.as_array().map(Vec::len), Some(1));
    assert_eq!(cars[0]["customer_doc"], "11122233344");
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_update_onto_taken_doc_is_rejected(pool: PgPool) {
    let ctx = TestContext::new(pool).await;
    ctx.create_customer(DOC, "Fulano").await;
    ctx.create_customer("11122233344", "Ciclano").await;

    let (status, body) = send(
        ctx.put(&format!("/api/customer/{DOC}"))
            .json(&json!({ "doc": "11122233344", "name": "Fulano" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Customer already exists: 11122233344");
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_update_unknown_customer_is_not_found(pool: PgPool) {
    let ctx = TestContext::new(pool).await;

    let (status, _) = send(
        ctx.put("/api/customer/00000000000")
            .json(&json!({ "doc": DOC, "name": "Fulano" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_cascades_to_cars(pool: PgPool) {
    let ctx = TestContext::new(pool).await;
    ctx.create_customer(DOC, "Fulano").await;
    let other = ctx.create_customer("11122233344", "Ciclano").await;
    let cars = ctx.create_car(DOC, "gray", "hatch").await;
    let car_id = cars[0]["id"].clone();

    let (status, remaining) = send(ctx.delete(&format!("/api/customer/{DOC}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(remaining, json!([other]));

    let (status, _) = send(ctx.delete(&format!("/api/car/{DOC}/{car_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, cars) = send(ctx.get("/api/cars")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cars, json!([]));

    let (status, _) = send(ctx.delete(&format!("/api/customer/{DOC}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "autolot_api::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_padded_doc_does_not_resolve(pool: PgPool) {
    let ctx = TestContext::new(pool).await;
    ctx.create_customer(DOC, "Fulano").await;

    let (status, _) = send(ctx.get(&format!("/api/customer/%20{DOC}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        ctx.post("/api/customers")
            .json(&json!({ "doc": format!("{DOC} "), "name": "Ciclano" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "doc cannot start or end with whitespace");

    let (status, body) = send(ctx.get("/api/customers")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("customers is an array").len(), 1);
}
