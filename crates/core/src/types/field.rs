//! Bounded text fields.
//!
//! Customer documents, customer names and usernames are plain strings with a
//! column-size limit. Each gets its own newtype so a name can never be bound
//! where a document is expected.
//!
//! Names are display text and get trimmed. Docs and usernames are lookup keys:
//! surrounding whitespace is rejected so `" 123"` never resolves to `"123"`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a bounded text field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The input string is empty or only whitespace.
    #[error("{field} cannot be empty")]
    Empty {
        /// Field name as it appears in request bodies.
        field: &'static str,
    },
    /// The input string is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name as it appears in request bodies.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// An identifier starts or ends with whitespace.
    #[error("{field} cannot start or end with whitespace")]
    Padded {
        /// Field name as it appears in request bodies.
        field: &'static str,
    },
}

/// How a field treats surrounding whitespace.
#[derive(Clone, Copy)]
enum Whitespace {
    Trim,
    Reject,
}

fn check_bounded<'s>(
    s: &'s str,
    field: &'static str,
    max: usize,
    whitespace: Whitespace,
) -> Result<&'s str, FieldError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty { field });
    }
    if matches!(whitespace, Whitespace::Reject) && trimmed.len() != s.len() {
        return Err(FieldError::Padded { field });
    }
    if trimmed.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(trimmed)
}

macro_rules! define_field {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr, $whitespace:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LENGTH: usize = $max;

            /// Parse from a string.
            ///
            /// # Errors
            ///
            /// Returns [`FieldError::Empty`] for blank input,
            /// [`FieldError::Padded`] for an identifier with surrounding
            /// whitespace, and [`FieldError::TooLong`] when over
            /// [`Self::MAX_LENGTH`] characters.
            pub fn parse(s: &str) -> Result<Self, FieldError> {
                check_bounded(s, $field, Self::MAX_LENGTH, $whitespace)
                    .map(|value| Self(value.to_owned()))
            }

            /// Returns the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the value and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                // Column constraints already hold for stored values
                Ok(Self(s))
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_field!(
    /// A customer's identity document number (e.g. a CPF).
    ///
    /// Unique across customers and used as the natural key in URLs.
    Doc,
    "doc",
    20,
    Whitespace::Reject
);

define_field!(
    /// A customer's display name.
    CustomerName,
    "name",
    200,
    Whitespace::Trim
);

define_field!(
    /// A login name for Basic authentication.
    Username,
    "username",
    32,
    Whitespace::Reject
);
