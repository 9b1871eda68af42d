//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness
//! GET    /health/ready           - Readiness (database reachable)
//!
//! # Users
//! GET    /api/users              - List users
//! POST   /api/users              - Register a user (no auth)
//!
//! # Customers
//! GET    /api/customers          - List customers
//! POST   /api/customers          - Create a customer
//! GET    /api/customer/{doc}     - Customer detail
//! PUT    /api/customer/{doc}     - Update doc and name
//! DELETE /api/customer/{doc}     - Delete with cars, returns remaining customers
//!
//! # Cars
//! GET    /api/cars               - List cars
//! POST   /api/cars               - Register a car, returns the owner's cars
//! GET    /api/car/{doc}          - Cars of one customer
//! PUT    /api/car/{doc}/{id}     - Update color and model
//! DELETE /api/car/{doc}/{id}     - Delete, returns the owner's remaining cars
//! ```
//!
//! Everything under `/api` except `POST /api/users` requires Basic auth.

pub mod cars;
pub mod customers;
pub mod health;
pub mod users;

use axum::{
    Router, middleware,
    routing::{get, put},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(users::index).post(users::register))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::index).post(customers::create))
        .route(
            "/customer/{doc}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::destroy),
        )
}

/// Create the car routes router.
pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(cars::index).post(cars::create))
        .route("/car/{doc}", get(cars::for_customer))
        .route("/car/{doc}/{id}", put(cars::update).delete(cars::destroy))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest(
            "/api",
            Router::new()
                .merge(user_routes())
                .merge(customer_routes())
                .merge(car_routes()),
        )
}

/// Build the complete application: routes, middleware, and state.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                        user = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{
            Method, Request, StatusCode,
            header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE},
        },
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ApiConfig;
    use crate::middleware::REQUEST_ID_HEADER;

    const UNREACHABLE_DB: &str = "postgres://autolot@127.0.0.1:1/autolot";

    /// App whose pool never connects. Good for anything decided before the
    /// first query.
    fn test_app() -> Router {
        let config = ApiConfig::from_lookup(|key| {
            (key == "AUTOLOT_DATABASE_URL").then(|| UNREACHABLE_DB.to_string())
        })
        .unwrap();
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy(UNREACHABLE_DB)
            .unwrap();
        app(AppState::new(config, pool))
    }

    async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
        assert!(response.headers().get(REQUEST_ID_HEADER).is_some());
    }

    #[tokio::test]
    async fn test_protected_routes_require_credentials() {
        let cases = [
            (Method::GET, "/api/users"),
            (Method::GET, "/api/customers"),
            (Method::POST, "/api/customers"),
            (Method::GET, "/api/customer/39987456321"),
            (Method::PUT, "/api/customer/39987456321"),
            (Method::DELETE, "/api/customer/39987456321"),
            (Method::GET, "/api/cars"),
            (Method::POST, "/api/cars"),
            (Method::GET, "/api/car/39987456321"),
            (Method::PUT, "/api/car/39987456321/1"),
            (Method::DELETE, "/api/car/39987456321/1"),
        ];

        for (method, uri) in cases {
            let (status, headers, body) = send(
                Request::builder()
                    .method(method.clone())
                    .uri(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(
                headers.get(WWW_AUTHENTICATE).unwrap(),
                "Basic realm=\"Authentication Required\""
            );
            assert_eq!(body["message"], "Unauthorized Access");
        }
    }

    #[tokio::test]
    async fn test_malformed_authorization_is_rejected() {
        let (status, headers, _) = send(
            Request::get("/api/customers")
                .header(AUTHORIZATION, "Basic not-base64!!")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(headers.get(WWW_AUTHENTICATE).is_some());
    }

    #[tokio::test]
    async fn test_padded_username_is_challenged_without_lookup() {
        use base64::{Engine, engine::general_purpose::STANDARD};

        // Rejected before any query, so the unreachable pool never answers 500
        let (status, headers, body) = send(
            Request::get("/api/customers")
                .header(
                    AUTHORIZATION,
                    format!("Basic {}", STANDARD.encode(" testuser:testpass")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(headers.get(WWW_AUTHENTICATE).is_some());
        assert_eq!(body["message"], "Unauthorized Access");
    }

    #[tokio::test]
    async fn test_register_without_body_is_missing_arguments() {
        let (status, _, body) = send(
            Request::post("/api/users")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username": "testuser"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Missing arguments.");
    }

    #[tokio::test]
    async fn test_register_with_empty_password_is_missing_arguments() {
        let (status, _, body) = send(
            Request::post("/api/users")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username": "testuser", "password": ""}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Missing arguments.");
    }
}
