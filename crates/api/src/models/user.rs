//! User domain types.
//!
//! The password hash never leaves the repository layer, so neither type here
//! carries it.

use serde::Serialize;

use autolot_core::{UserId, Username};

/// A registered API user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
}

/// The user whose Basic credentials authenticated the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: Username,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
