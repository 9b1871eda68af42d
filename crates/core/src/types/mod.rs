//! Core types for Autolot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod field;
pub mod id;
pub mod vehicle;

pub use field::{CustomerName, Doc, FieldError, Username};
pub use id::*;
pub use vehicle::{CarColor, CarModel, CarSpec, InvalidCarSpec, UnknownVariant};
