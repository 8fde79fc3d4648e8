//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is CPU bound, so both operations run on Tokio's blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordDigest, PlainPassword};

/// Argon2id hasher producing PHC strings with a fresh random salt.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2PasswordHasher {
    /// Library default parameters (19 MiB, 2 passes, 1 lane).
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Build a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when the parameters are
    /// rejected by the library.
    ///
    /// # Examples
    /// ```
    /// use siptalk::outbound::Argon2PasswordHasher;
    ///
    /// let hasher = Argon2PasswordHasher::with_params(8 * 1024, 1, 1);
    /// assert!(hasher.is_ok());
    /// ```
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

fn hash_blocking(
    argon2: &Argon2<'_>,
    password: &PlainPassword,
) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError::hashing(err.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    password: &PlainPassword,
    digest: &str,
) -> Result<bool, PasswordHashError> {
    let parsed =
        PasswordHash::new(digest).map_err(|err| PasswordHashError::hashing(err.to_string()))?;
    match argon2.verify_password(password.expose().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::hashing(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordDigest, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = password.clone();
        tokio::task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map(PasswordDigest::new)
    }

    async fn verify(
        &self,
        password: &PlainPassword,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let password = password.clone();
        let digest = digest.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&argon2, &password, &digest))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
    }
}
