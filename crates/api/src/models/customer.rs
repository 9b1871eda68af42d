//! Customer domain type.

use serde::Serialize;

use autolot_core::{CustomerId, CustomerName, Doc};

/// A vehicle owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Identity document number, unique across customers.
    pub doc: Doc,
    /// Display name.
    pub name: CustomerName,
    /// True while the customer owns no cars.
    pub sale_opp: bool,
}
