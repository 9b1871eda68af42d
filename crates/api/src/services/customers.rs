//! Customer registry.
//!
//! Owns the lifecycle of customer records. Document numbers arrive as raw
//! path or body strings; a path doc that cannot be a valid [`Doc`] cannot
//! name an existing customer, so it is reported as not found.

use sqlx::PgPool;

use autolot_core::{CustomerName, Doc};

use super::RegistryError;
use crate::db::{RepositoryError, customers};
use crate::models::Customer;

/// Customer registry over an injected connection pool.
pub struct CustomerRegistry<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRegistry<'a> {
    /// Create a new customer registry.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every customer.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<Customer>, RegistryError> {
        Ok(customers::list(self.pool).await?)
    }

    /// Get a customer by doc.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CustomerNotFound` if no customer has `doc`.
    pub async fn get(&self, doc: &str) -> Result<Customer, RegistryError> {
        let parsed = lookup_doc(doc)?;
        customers::get_by_doc(self.pool, &parsed)
            .await?
            .ok_or_else(|| RegistryError::CustomerNotFound(doc.to_owned()))
    }

    /// Register a new customer. New customers are always sale opportunities.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::MissingField` / `InvalidField` if doc or name
    /// are empty or too long.
    /// Returns `RegistryError::DuplicateDoc` if the doc is already registered.
    pub async fn create(&self, doc: &str, name: &str) -> Result<Customer, RegistryError> {
        let doc = Doc::parse(doc)?;
        let name = CustomerName::parse(name)?;

        let customer = customers::create(self.pool, &doc, &name)
            .await
            .map_err(|e| duplicate_doc(e, &doc))?;

        tracing::info!(customer_id = %customer.id, doc = %customer.doc, "Customer created");
        Ok(customer)
    }

    /// Overwrite a customer's doc and name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CustomerNotFound` if no customer has `doc`.
    /// Returns `RegistryError::MissingField` / `InvalidField` for bad fields.
    /// Returns `RegistryError::DuplicateDoc` if `new_doc` belongs to another customer.
    pub async fn update(
        &self,
        doc: &str,
        new_doc: &str,
        new_name: &str,
    ) -> Result<Customer, RegistryError> {
        let current = lookup_doc(doc)?;
        let mut tx = self.pool.begin().await?;

        if customers::lock_by_doc(&mut *tx, &current).await?.is_none() {
            return Err(RegistryError::CustomerNotFound(doc.to_owned()));
        }

        let new_doc = Doc::parse(new_doc)?;
        let new_name = CustomerName::parse(new_name)?;

        let customer = customers::update(&mut *tx, &current, &new_doc, &new_name)
            .await
            .map_err(|e| duplicate_doc(e, &new_doc))?
            .ok_or_else(|| RegistryError::CustomerNotFound(doc.to_owned()))?;

        tx.commit().await?;

        tracing::info!(
            customer_id = %customer.id,
            previous_doc = %current,
            doc = %customer.doc,
            "Customer updated"
        );
        Ok(customer)
    }

    /// Delete a customer and, by cascade, every car they own.
    ///
    /// Returns the customers that remain.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CustomerNotFound` if no customer has `doc`.
    pub async fn delete(&self, doc: &str) -> Result<Vec<Customer>, RegistryError> {
        let parsed = lookup_doc(doc)?;
        let mut tx = self.pool.begin().await?;

        if !customers::delete(&mut *tx, &parsed).await? {
            return Err(RegistryError::CustomerNotFound(doc.to_owned()));
        }

        let remaining = customers::list(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(doc = %parsed, remaining = remaining.len(), "Customer deleted");
        Ok(remaining)
    }
}

/// Parse a doc used to look up an existing customer.
fn lookup_doc(doc: &str) -> Result<Doc, RegistryError> {
    Doc::parse(doc).map_err(|_| RegistryError::CustomerNotFound(doc.to_owned()))
}

fn duplicate_doc(err: RepositoryError, doc: &Doc) -> RegistryError {
    match err {
        RepositoryError::Conflict(_) => RegistryError::DuplicateDoc(doc.to_string()),
        other => RegistryError::Repository(other),
    }
}
