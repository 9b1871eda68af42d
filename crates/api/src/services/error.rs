//! Registry error types.

use thiserror::Error;

use autolot_core::{FieldError, InvalidCarSpec, MAX_CARS_PER_CUSTOMER};

use crate::db::RepositoryError;

/// Errors raised by the customer and vehicle registries.
///
/// Display strings are the messages returned to API clients.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No customer has the given doc.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Another customer already holds the doc.
    #[error("Customer already exists: {0}")]
    DuplicateDoc(String),

    /// No car matches both the customer doc and the car id.
    #[error("Car not found for customer {doc} and pk {id}")]
    CarNotFound { doc: String, id: String },

    /// The customer already owns the maximum number of cars.
    #[error("Limit of cars reached ({max}) to the customer {doc}", max = MAX_CARS_PER_CUSTOMER)]
    CarLimitReached { doc: String },

    /// Color or model outside the accepted sets.
    #[error(transparent)]
    InvalidCarSpec(#[from] InvalidCarSpec),

    /// A required field was empty.
    #[error("Missing arguments: {0}")]
    MissingField(FieldError),

    /// A field broke a length rule.
    #[error("{0}")]
    InvalidField(FieldError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<FieldError> for RegistryError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Empty { .. } => Self::MissingField(err),
            FieldError::TooLong { .. } | FieldError::Padded { .. } => Self::InvalidField(err),
        }
    }
}

impl From<sqlx::Error> for RegistryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

#[cfg(test)]
mod tests {
    use autolot_core::CarSpec;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RegistryError::CustomerNotFound("39987456322".to_string()).to_string(),
            "Customer not found: 39987456322"
        );
        assert_eq!(
            RegistryError::CarLimitReached {
                doc: "39987456321".to_string()
            }
            .to_string(),
            "Limit of cars reached (3) to the customer 39987456321"
        );
        assert_eq!(
            RegistryError::CarNotFound {
                doc: "39987456321".to_string(),
                id: "9".to_string()
            }
            .to_string(),
            "Car not found for customer 39987456321 and pk 9"
        );
    }

    #[test]
    fn test_invalid_car_spec_message_is_transparent() {
        let Err(spec_err) = CarSpec::parse("red", "hatch") else {
            panic!("red is not a car color");
        };
        let err = RegistryError::from(spec_err);
        assert!(err.to_string().starts_with("Wrong car color (red not in"));
    }

    #[test]
    fn test_field_errors_split_by_kind() {
        let empty = RegistryError::from(FieldError::Empty { field: "doc" });
        assert!(matches!(empty, RegistryError::MissingField(_)));
        assert_eq!(empty.to_string(), "Missing arguments: doc cannot be empty");

        let long = RegistryError::from(FieldError::TooLong {
            field: "name",
            max: 200,
        });
        assert!(matches!(long, RegistryError::InvalidField(_)));
        assert_eq!(long.to_string(), "name must be at most 200 characters");

        let padded = RegistryError::from(FieldError::Padded { field: "doc" });
        assert!(matches!(padded, RegistryError::InvalidField(_)));
        assert_eq!(padded.to_string(), "doc cannot start or end with whitespace");
    }
}
