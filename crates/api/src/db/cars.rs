//! Car queries.

use sqlx::PgExecutor;

use autolot_core::{CarId, CarSpec, Doc};

use super::RepositoryError;
use crate::models::Car;

/// List every car.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Car>, RepositoryError> {
    let cars = sqlx::query_as::<_, Car>(
        r"
        SELECT id, customer_doc, color, model
        FROM car
        ORDER BY id
        ",
    )
    .fetch_all(executor)
    .await?;

    Ok(cars)
}

/// List the cars owned by one customer.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_for_customer<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
) -> Result<Vec<Car>, RepositoryError> {
    let cars = sqlx::query_as::<_, Car>(
        r"
        SELECT id, customer_doc, color, model
        FROM car
        WHERE customer_doc = $1
        ORDER BY id
        ",
    )
    .bind(doc)
    .fetch_all(executor)
    .await?;

    Ok(cars)
}

/// Get a car owned by `doc`, locking the row until the surrounding
/// transaction ends.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lock<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    id: CarId,
) -> Result<Option<Car>, RepositoryError> {
    let car = sqlx::query_as::<_, Car>(
        r"
        SELECT id, customer_doc, color, model
        FROM car
        WHERE customer_doc = $1 AND id = $2
        FOR UPDATE
        ",
    )
    .bind(doc)
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(car)
}

/// Count the cars owned by one customer.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn count_for_customer<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
) -> Result<i64, RepositoryError> {
    let count: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*)
        FROM car
        WHERE customer_doc = $1
        ",
    )
    .bind(doc)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

/// Insert a car for a customer.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails (including a
/// foreign-key violation when the customer doesn't exist).
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    spec: CarSpec,
) -> Result<Car, RepositoryError> {
    let car = sqlx::query_as::<_, Car>(
        r"
        INSERT INTO car (customer_doc, color, model)
        VALUES ($1, $2, $3)
        RETURNING id, customer_doc, color, model
        ",
    )
    .bind(doc)
    .bind(spec.color)
    .bind(spec.model)
    .fetch_one(executor)
    .await?;

    Ok(car)
}

/// Overwrite a car's color and model.
///
/// # Returns
///
/// Returns `None` if no car matches both `id` and `doc`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    id: CarId,
    spec: CarSpec,
) -> Result<Option<Car>, RepositoryError> {
    let car = sqlx::query_as::<_, Car>(
        r"
        UPDATE car
        SET color = $3, model = $4
        WHERE customer_doc = $1 AND id = $2
        RETURNING id, customer_doc, color, model
        ",
    )
    .bind(doc)
    .bind(id)
    .bind(spec.color)
    .bind(spec.model)
    .fetch_optional(executor)
    .await?;

    Ok(car)
}

/// Delete a car owned by `doc`.
///
/// # Returns
///
/// Returns `true` if the car was deleted, `false` if no car matched.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    id: CarId,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        r"
        DELETE FROM car
        WHERE customer_doc = $1 AND id = $2
        ",
    )
    .bind(doc)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
