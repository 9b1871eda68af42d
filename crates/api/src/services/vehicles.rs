//! Vehicle registry.
//!
//! Registers cars against customers and keeps each owner's `sale_opp` flag
//! equal to "owns no cars". Every mutation runs in one transaction so the
//! car rows and the flag change together.
//!
//! Registration checks run in a fixed order: the customer must exist, then
//! must be under the car limit, then color and model must be valid.

use sqlx::PgPool;

use autolot_core::{CarId, CarSpec, Doc, rules};

use super::RegistryError;
use crate::db::{cars, customers};
use crate::models::Car;

/// Vehicle registry over an injected connection pool.
pub struct VehicleRegistry<'a> {
    pool: &'a PgPool,
}

impl<'a> VehicleRegistry<'a> {
    /// Create a new vehicle registry.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every car.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<Car>, RegistryError> {
        Ok(cars::list(self.pool).await?)
    }

    /// List the cars owned by a customer.
    ///
    /// An existing customer without cars yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CustomerNotFound` if no customer has `doc`.
    pub async fn list_for_customer(&self, doc: &str) -> Result<Vec<Car>, RegistryError> {
        let parsed = customer_doc(doc)?;

        if customers::get_by_doc(self.pool, &parsed).await?.is_none() {
            return Err(RegistryError::CustomerNotFound(doc.to_owned()));
        }

        Ok(cars::list_for_customer(self.pool, &parsed).await?)
    }

    /// Register a car for a customer and return all of that customer's cars.
    ///
    /// The customer row stays locked from the limit check to the commit.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence:
    /// - `RegistryError::CustomerNotFound` if no customer has `doc`
    /// - `RegistryError::CarLimitReached` if the customer already owns the maximum
    /// - `RegistryError::InvalidCarSpec` if color or model is not accepted
    pub async fn create(
        &self,
        doc: &str,
        color: &str,
        model: &str,
    ) -> Result<Vec<Car>, RegistryError> {
        let parsed = customer_doc(doc)?;
        let mut tx = self.pool.begin().await?;

        if customers::lock_by_doc(&mut *tx, &parsed).await?.is_none() {
            return Err(RegistryError::CustomerNotFound(doc.to_owned()));
        }

        let owned = cars::count_for_customer(&mut *tx, &parsed).await?;
        if let Err(limit) = rules::ensure_can_add_car(owned) {
            tracing::debug!(doc = %parsed, owned = limit.owned, "Car limit reached");
            return Err(RegistryError::CarLimitReached {
                doc: doc.to_owned(),
            });
        }

        let spec = CarSpec::parse(color, model)?;

        let car = cars::create(&mut *tx, &parsed, spec).await?;
        customers::set_sale_opp(&mut *tx, &parsed, rules::is_sale_opportunity(owned + 1)).await?;
        let owned_cars = cars::list_for_customer(&mut *tx, &parsed).await?;

        tx.commit().await?;

        tracing::info!(
            car_id = %car.id,
            doc = %parsed,
            color = %car.color,
            model = %car.model,
            "Car registered"
        );
        Ok(owned_cars)
    }

    /// Overwrite a car's color and model.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CarNotFound` if no car matches both `doc` and `id`.
    /// Returns `RegistryError::InvalidCarSpec` if color or model is not accepted.
    pub async fn update(
        &self,
        doc: &str,
        id: &str,
        color: &str,
        model: &str,
    ) -> Result<Car, RegistryError> {
        let (parsed, car_id) = car_key(doc, id)?;
        let mut tx = self.pool.begin().await?;

        if cars::lock(&mut *tx, &parsed, car_id).await?.is_none() {
            return Err(car_not_found(doc, id));
        }

        let spec = CarSpec::parse(color, model)?;

        let car = cars::update(&mut *tx, &parsed, car_id, spec)
            .await?
            .ok_or_else(|| car_not_found(doc, id))?;

        tx.commit().await?;

        tracing::info!(car_id = %car.id, doc = %parsed, "Car updated");
        Ok(car)
    }

    /// Delete a car and return the owner's remaining cars.
    ///
    /// When the last car goes, the owner becomes a sale opportunity again. The
    /// owner row is locked first, as in [`Self::create`], so the remaining
    /// count cannot go stale before `sale_opp` is written. A missing owner row
    /// is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CarNotFound` if no car matches both `doc` and `id`.
    pub async fn delete(&self, doc: &str, id: &str) -> Result<Vec<Car>, RegistryError> {
        let (parsed, car_id) = car_key(doc, id)?;
        let mut tx = self.pool.begin().await?;

        let has_owner = customers::lock_by_doc(&mut *tx, &parsed).await?.is_some();

        if !cars::delete(&mut *tx, &parsed, car_id).await? {
            return Err(car_not_found(doc, id));
        }

        let remaining = cars::list_for_customer(&mut *tx, &parsed).await?;
        let owned = i64::try_from(remaining.len()).unwrap_or(i64::MAX);
        if rules::is_sale_opportunity(owned) {
            if has_owner {
                customers::set_sale_opp(&mut *tx, &parsed, true).await?;
            } else {
                tracing::warn!(doc = %parsed, "Deleted car had no owner row");
            }
        }

        tx.commit().await?;

        tracing::info!(car_id = %car_id, doc = %parsed, remaining = owned, "Car deleted");
        Ok(remaining)
    }
}

/// Parse a doc that must name an existing customer.
fn customer_doc(doc: &str) -> Result<Doc, RegistryError> {
    Doc::parse(doc).map_err(|_| RegistryError::CustomerNotFound(doc.to_owned()))
}

/// Parse the `(doc, id)` pair that addresses one car.
fn car_key(doc: &str, id: &str) -> Result<(Doc, CarId), RegistryError> {
    let parsed_doc = Doc::parse(doc).map_err(|_| car_not_found(doc, id))?;
    let car_id = id.parse::<CarId>().map_err(|_| car_not_found(doc, id))?;
    Ok((parsed_doc, car_id))
}

fn car_not_found(doc: &str, id: &str) -> RegistryError {
    RegistryError::CarNotFound {
        doc: doc.to_owned(),
        id: id.to_owned(),
    }
}
