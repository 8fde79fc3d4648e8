//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::{PasswordDigest, PlainPassword};

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing or parsing stored hashes.
    pub enum PasswordHashError {
        /// The hashing backend could not produce or parse a hash.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, slow password hashing.
///
/// `verify` returns `Ok(false)` for a mismatch; errors are reserved for
/// malformed stored hashes or backend failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt.
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordDigest, PasswordHashError>;

    /// Compare a plaintext password against a stored digest.
    async fn verify(
        &self,
        password: &PlainPassword,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError>;
}
