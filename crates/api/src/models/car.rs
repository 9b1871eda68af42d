//! Car domain type.

use serde::Serialize;

use autolot_core::{CarColor, CarId, CarModel, Doc};

/// A vehicle registered to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Car {
    /// Unique car ID.
    pub id: CarId,
    /// Document number of the owning customer.
    pub customer_doc: Doc,
    pub color: CarColor,
    pub model: CarModel,
}
