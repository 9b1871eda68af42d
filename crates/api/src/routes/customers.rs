//! Customer route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Customer;
use crate::services::CustomerRegistry;
use crate::state::AppState;

/// Body for creating or updating a customer.
///
/// `sale_opp` is derived from car ownership, so a client-supplied value is
/// ignored along with any other unknown field.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub doc: String,
    pub name: String,
}

/// `GET /api/customers`
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>> {
    Ok(Json(CustomerRegistry::new(state.pool()).list().await?))
}

/// `POST /api/customers`
#[instrument(skip_all)]
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>)> {
    let Json(request) = body?;
    let customer = CustomerRegistry::new(state.pool())
        .create(&request.doc, &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// `GET /api/customer/{doc}`
#[instrument(skip_all, fields(doc = %doc))]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(doc): Path<String>,
) -> Result<Json<Customer>> {
    Ok(Json(CustomerRegistry::new(state.pool()).get(&doc).await?))
}

/// `PUT /api/customer/{doc}`
#[instrument(skip_all, fields(doc = %doc))]
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(doc): Path<String>,
    body: std::result::Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Json<Customer>> {
    let Json(request) = body?;
    let customer = CustomerRegistry::new(state.pool())
        .update(&doc, &request.doc, &request.name)
        .await?;
    Ok(Json(customer))
}

/// `DELETE /api/customer/{doc}`
///
/// Responds with the customers that remain.
#[instrument(skip_all, fields(doc = %doc))]
pub async fn destroy(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(doc): Path<String>,
) -> Result<Json<Vec<Customer>>> {
    Ok(Json(CustomerRegistry::new(state.pool()).delete(&doc).await?))
}
