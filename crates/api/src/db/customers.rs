//! Customer queries.

use sqlx::PgExecutor;

use autolot_core::{CustomerName, Doc};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Customer;

/// List every customer.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Customer>, RepositoryError> {
    let customers = sqlx::query_as::<_, Customer>(
        r"
        SELECT id, doc, name, sale_opp
        FROM customer
        ORDER BY id
        ",
    )
    .fetch_all(executor)
    .await?;

    Ok(customers)
}

/// Get a customer by document number.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_doc<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
) -> Result<Option<Customer>, RepositoryError> {
    let customer = sqlx::query_as::<_, Customer>(
        r"
        SELECT id, doc, name, sale_opp
        FROM customer
        WHERE doc = $1
        ",
    )
    .bind(doc)
    .fetch_optional(executor)
    .await?;

    Ok(customer)
}

/// Get a customer by document number and lock the row until the surrounding
/// transaction ends.
///
/// Car registration holds this lock while counting and inserting, so two
/// concurrent registrations for one customer are serialized.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lock_by_doc<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
) -> Result<Option<Customer>, RepositoryError> {
    let customer = sqlx::query_as::<_, Customer>(
        r"
        SELECT id, doc, name, sale_opp
        FROM customer
        WHERE doc = $1
        FOR UPDATE
        ",
    )
    .bind(doc)
    .fetch_optional(executor)
    .await?;

    Ok(customer)
}

/// Insert a customer with `sale_opp = TRUE`.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the doc already exists.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    name: &CustomerName,
) -> Result<Customer, RepositoryError> {
    sqlx::query_as::<_, Customer>(
        r"
        INSERT INTO customer (doc, name, sale_opp)
        VALUES ($1, $2, TRUE)
        RETURNING id, doc, name, sale_opp
        ",
    )
    .bind(doc)
    .bind(name)
    .fetch_one(executor)
    .await
    .map_err(|e| conflict_on_unique(e, "customer doc"))
}

/// Overwrite a customer's doc and name.
///
/// Owned cars follow the new doc through `ON UPDATE CASCADE`.
///
/// # Returns
///
/// Returns `None` if no customer has `doc`.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if `new_doc` belongs to another customer.
/// Returns `RepositoryError::Database` for other database errors.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    new_doc: &Doc,
    new_name: &CustomerName,
) -> Result<Option<Customer>, RepositoryError> {
    sqlx::query_as::<_, Customer>(
        r"
        UPDATE customer
        SET doc = $2, name = $3
        WHERE doc = $1
        RETURNING id, doc, name, sale_opp
        ",
    )
    .bind(doc)
    .bind(new_doc)
    .bind(new_name)
    .fetch_optional(executor)
    .await
    .map_err(|e| conflict_on_unique(e, "customer doc"))
}

/// Set the sale-opportunity flag.
///
/// # Returns
///
/// Returns `true` if a customer row was updated.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn set_sale_opp<'e>(
    executor: impl PgExecutor<'e>,
    doc: &Doc,
    sale_opp: bool,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE customer
        SET sale_opp = $2
        WHERE doc = $1
        ",
    )
    .bind(doc)
    .bind(sale_opp)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a customer. Owned cars go with it through `ON DELETE CASCADE`.
///
/// # Returns
///
/// Returns `true` if the customer was deleted, `false` if it didn't exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn delete<'e>(executor: impl PgExecutor<'e>, doc: &Doc) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        r"
        DELETE FROM customer
        WHERE doc = $1
        ",
    )
    .bind(doc)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
