//! Autolot Core - Shared types library.
//!
//! This crate provides the domain vocabulary used by every Autolot component:
//! - `api` - HTTP service for users, customers and cars
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP. Database encodings are behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, bounded text fields, and car attribute enums
//! - [`rules`] - Car ownership limit and sale-opportunity rule

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod rules;
pub mod types;

pub use rules::{CarLimitReached, MAX_CARS_PER_CUSTOMER};
pub use types::*;
