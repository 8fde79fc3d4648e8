//! Port abstraction for server-side session storage.
//!
//! Adapters key records by [`SessionToken::digest`] so the stored key never
//! equals the cookie value.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Session, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "session store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record `session` under `token`, replacing any previous record.
    async fn insert(&self, token: &SessionToken, session: &Session)
    -> Result<(), SessionStoreError>;

    /// Look up the session a token points at.
    async fn find(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError>;

    /// Drop the session. Removing an absent token succeeds.
    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError>;

    /// Reset `established_at` and return the updated session, if any.
    async fn touch(
        &self,
        token: &SessionToken,
        established_at: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionStoreError>;
}
