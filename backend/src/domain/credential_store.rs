//! Credential store: account creation and password verification.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::ports::{PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered. Try logging in.";
pub(crate) const USER_NOT_FOUND_MESSAGE: &str = "Email not registered. Please sign up first.";
pub(crate) const INVALID_PASSWORD_MESSAGE: &str = "Incorrect password. Please try again.";
const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Stores accounts behind a [`UserRepository`] and hashes passwords with a
/// [`PasswordHasher`].
#[derive(Clone)]
pub struct CredentialStore<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> CredentialStore<U, H> {
    /// Create a store over the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> CredentialStore<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_user_error(error: UserPersistenceError, fallback: &str) -> Error {
        match error {
            UserPersistenceError::DuplicateEmail => Error::duplicate_email(DUPLICATE_EMAIL_MESSAGE),
            UserPersistenceError::Connection { message } => {
                error!(detail = %message, "user repository unavailable");
                Error::service_unavailable(fallback)
            }
            UserPersistenceError::Query { message } => {
                error!(detail = %message, "user repository query failed");
                Error::internal(fallback)
            }
        }
    }

    fn map_hash_error(error: PasswordHashError, fallback: &str) -> Error {
        error!(error = %error, "password hashing failed");
        Error::internal(fallback)
    }

    /// Create an account for a validated registration.
    ///
    /// The pre-insert lookup gives the friendly duplicate message early; the
    /// storage unique constraint still decides races.
    pub async fn register(&self, registration: Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(|err| Self::map_user_error(err, REGISTRATION_FAILED_MESSAGE))?;
        if existing.is_some() {
            return Err(Error::duplicate_email(DUPLICATE_EMAIL_MESSAGE));
        }

        let password = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(|err| Self::map_hash_error(err, REGISTRATION_FAILED_MESSAGE))?;
        let user = User {
            id: UserId::random(),
            full_name: registration.full_name().clone(),
            email: registration.email().clone(),
            password,
        };
        self.users
            .insert(&user)
            .await
            .map_err(|err| Self::map_user_error(err, REGISTRATION_FAILED_MESSAGE))?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check credentials and return the matching account.
    pub async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| Self::map_user_error(err, LOGIN_FAILED_MESSAGE))?
        else {
            return Err(Error::user_not_found(USER_NOT_FOUND_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &user.password)
            .await
            .map_err(|err| Self::map_hash_error(err, LOGIN_FAILED_MESSAGE))?;
        if matches {
            Ok(user)
        } else {
            Err(Error::invalid_credentials(INVALID_PASSWORD_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "credential_store_tests.rs"]
mod tests;
