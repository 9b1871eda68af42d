//! Business logic services.
//!
//! - [`auth`] - Credential store (registration, Basic auth verification)
//! - [`customers`] - Customer registry
//! - [`vehicles`] - Vehicle registry (car limit, enum checks, `sale_opp` upkeep)
//!
//! Every service borrows the connection pool it is given; none holds global
//! state.

pub mod auth;
pub mod customers;
mod error;
pub mod vehicles;

pub use auth::{AuthError, AuthService};
pub use customers::CustomerRegistry;
pub use error::RegistryError;
pub use vehicles::VehicleRegistry;
