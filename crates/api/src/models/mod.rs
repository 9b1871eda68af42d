//! Domain models for the API.
//!
//! Each model derives `Serialize` with exactly the fields exposed over HTTP,
//! and `FromRow` so repositories can load it directly.

pub mod car;
pub mod customer;
pub mod user;

pub use car::Car;
pub use customer::Customer;
pub use user::{CurrentUser, User};
