//! Ownership rules for customers and their cars.
//!
//! These are pure functions over car counts so the registries and the tests
//! share one definition of each rule.

/// Maximum number of cars a single customer may own.
pub const MAX_CARS_PER_CUSTOMER: i64 = 3;

/// A customer already owns the maximum number of cars.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("customer already owns {owned} of {max} cars", max = MAX_CARS_PER_CUSTOMER)]
pub struct CarLimitReached {
    /// Cars currently owned.
    pub owned: i64,
}

/// Check whether a customer owning `owned` cars may register one more.
///
/// # Errors
///
/// Returns [`CarLimitReached`] when `owned` is at or above
/// [`MAX_CARS_PER_CUSTOMER`].
pub const fn ensure_can_add_car(owned: i64) -> Result<(), CarLimitReached> {
    if owned >= MAX_CARS_PER_CUSTOMER {
        return Err(CarLimitReached { owned });
    }
    Ok(())
}

/// A customer is a sale opportunity exactly when they own no cars.
#[must_use]
pub const fn is_sale_opportunity(owned: i64) -> bool {
    owned == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_three_cars_allowed() {
        for owned in 0..MAX_CARS_PER_CUSTOMER {
            assert!(ensure_can_add_car(owned).is_ok(), "owned = {owned}");
        }
    }

    #[test]
    fn test_fourth_car_rejected() {
        assert_eq!(
            ensure_can_add_car(3),
            Err(CarLimitReached { owned: 3 })
        );
        assert!(ensure_can_add_car(4).is_err());
    }

    #[test]
    fn test_sale_opportunity_tracks_car_count() {
        assert!(is_sale_opportunity(0));
        assert!(!is_sale_opportunity(1));
        assert!(!is_sale_opportunity(MAX_CARS_PER_CUSTOMER));
    }
}
