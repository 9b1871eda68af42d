//! Car route handlers.
//!
//! Cars are addressed by their owner's doc plus their own id. The id stays a
//! string until the registry parses it, so `/api/car/{doc}/abc` is a plain
//! not-found rather than a path rejection.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Car;
use crate::services::VehicleRegistry;
use crate::state::AppState;

/// Body for registering a car.
#[derive(Debug, Deserialize)]
pub struct CreateCarRequest {
    pub customer_doc: String,
    pub color: String,
    pub model: String,
}

/// Body for updating a car.
#[derive(Debug, Deserialize)]
pub struct UpdateCarRequest {
    pub color: String,
    pub model: String,
}

/// `GET /api/cars`
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Car>>> {
    Ok(Json(VehicleRegistry::new(state.pool()).list().await?))
}

/// `POST /api/cars`
///
/// Responds with every car the owner now has.
#[instrument(skip_all)]
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateCarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Car>>)> {
    let Json(request) = body?;
    let cars = VehicleRegistry::new(state.pool())
        .create(&request.customer_doc, &request.color, &request.model)
        .await?;
    Ok((StatusCode::CREATED, Json(cars)))
}

/// `GET /api/car/{doc}`
#[instrument(skip_all, fields(doc = %doc))]
pub async fn for_customer(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(doc): Path<String>,
) -> Result<Json<Vec<Car>>> {
    Ok(Json(
        VehicleRegistry::new(state.pool())
            .list_for_customer(&doc)
            .await?,
    ))
}

/// `PUT /api/car/{doc}/{id}`
#[instrument(skip_all, fields(doc = %doc, car_id = %id))]
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path((doc, id)): Path<(String, String)>,
    body: std::result::Result<Json<UpdateCarRequest>, JsonRejection>,
) -> Result<Json<Car>> {
    let Json(request) = body?;
    let car = VehicleRegistry::new(state.pool())
        .update(&doc, &id, &request.color, &request.model)
        .await?;
    Ok(Json(car))
}

/// `DELETE /api/car/{doc}/{id}`
#[instrument(skip_all, fields(doc = %doc, car_id = %id))]
pub async fn destroy(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path((doc, id)): Path<(String, String)>,
) -> Result<Json<Vec<Car>>> {
    Ok(Json(VehicleRegistry::new(state.pool()).delete(&doc, &id).await?))
}
