//! Closed sets of car attributes.
//!
//! Colors and models are stored as `PostgreSQL` enum types (`car_color`,
//! `car_model`) and serialized as their lowercase names.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a member of a closed attribute set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{value} is not a valid {kind}")]
pub struct UnknownVariant {
    /// Which attribute was being parsed ("color" or "model").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Car paint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "car_color", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum CarColor {
    Yellow,
    Blue,
    Gray,
}

impl CarColor {
    /// Every accepted color, in declaration order.
    pub const ALL: [Self; 3] = [Self::Yellow, Self::Blue, Self::Gray];

    /// Lowercase name used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for CarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarColor {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "color",
                value: s.to_owned(),
            })
    }
}

/// Car body model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "car_model", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum CarModel {
    Hatch,
    Sedan,
    Convertible,
}

impl CarModel {
    /// Every accepted model, in declaration order.
    pub const ALL: [Self; 3] = [Self::Hatch, Self::Sedan, Self::Convertible];

    /// Lowercase name used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hatch => "hatch",
            Self::Sedan => "sedan",
            Self::Convertible => "convertible",
        }
    }
}

impl fmt::Display for CarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarModel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "model",
                value: s.to_owned(),
            })
    }
}

/// A validated color/model pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSpec {
    pub color: CarColor,
    pub model: CarModel,
}

impl CarSpec {
    /// Parse a color and model together.
    ///
    /// Both inputs are checked before failing so the error can name whichever
    /// of them was wrong.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCarSpec`] if either value is outside its set.
    pub fn parse(color: &str, model: &str) -> Result<Self, InvalidCarSpec> {
        match (color.parse::<CarColor>(), model.parse::<CarModel>()) {
            (Ok(color), Ok(model)) => Ok(Self { color, model }),
            _ => Err(InvalidCarSpec {
                color: color.to_owned(),
                model: model.to_owned(),
            }),
        }
    }
}

/// A color/model pair where at least one value is outside its set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Wrong car color ({color} not in 'yellow', 'blue' or 'gray') or model ({model} not in 'hatch', 'sedan' or 'convertible')."
)]
pub struct InvalidCarSpec {
    pub color: String,
    pub model: String,
}
