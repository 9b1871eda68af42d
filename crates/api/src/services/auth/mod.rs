//! Authentication service.
//!
//! Stores users with Argon2id password hashes and verifies the credentials
//! carried by HTTP Basic authentication.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use autolot_core::{FieldError, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
///
/// Handles user registration and credential verification.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingArguments` if either field is empty.
    /// Returns `AuthError::InvalidUsername` if the username is too long.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if password.is_empty() {
            return Err(AuthError::MissingArguments);
        }
        let username = Username::parse(username).map_err(|e| match e {
            FieldError::Empty { .. } => AuthError::MissingArguments,
            other => AuthError::InvalidUsername(other),
        })?;

        if self.users.get_by_username(&username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        // A concurrent registration can still win the race; the unique index decides
        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify a username and password.
    ///
    /// Returns the user on success and `None` when the user does not exist or
    /// the password does not match.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Option<User>, AuthError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };

        let Some(row) = self.users.get_with_password_hash(&username).await? else {
            return Ok(None);
        };

        Ok(verify_password(password, &row.password_hash).then_some(row.user))
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.list().await?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash. An unparseable hash never matches.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
