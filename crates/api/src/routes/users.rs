//! User route handlers.
//!
//! Registration is the only endpoint reachable without credentials.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// `GET /api/users`
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    let users = AuthService::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// `POST /api/users`
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(request) = body?;
    let user = AuthService::new(state.pool())
        .register(&request.username, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}
