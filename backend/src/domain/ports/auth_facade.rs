//! Driving port for registration, login, and session lifecycle use-cases.
//!
//! Inbound adapters pass the session token they read from the cookie; the
//! facade never touches cookies itself.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::{
    Error, LoginCredentials, Registration, Session, SessionChanged, SessionToken, UserIdentity,
};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Token the adapter must persist in the client's session cookie.
    pub token: SessionToken,
    pub session: Session,
}

/// Domain use-case port for authentication and session state.
#[async_trait]
pub trait AuthFacade: Send + Sync {
    /// Create an account and return its public identity.
    async fn register(&self, registration: Registration) -> Result<UserIdentity, Error>;

    /// Verify credentials and open a fresh session.
    ///
    /// `previous` is the token the client already holds. Its session is
    /// closed once the credentials verify, so one client never holds two
    /// live sessions.
    async fn login(
        &self,
        credentials: LoginCredentials,
        previous: Option<&SessionToken>,
    ) -> Result<LoginOutcome, Error>;

    /// Close the session behind `token`, if any. Idempotent.
    async fn logout(&self, token: Option<&SessionToken>) -> Result<(), Error>;

    /// Resolve the session behind `token`.
    async fn current_user(&self, token: Option<&SessionToken>) -> Result<Option<Session>, Error>;

    /// Whether `token` resolves to a session.
    async fn is_authenticated(&self, token: Option<&SessionToken>) -> Result<bool, Error> {
        Ok(self.current_user(token).await?.is_some())
    }

    /// Restart the staleness clock of the session behind `token`.
    async fn refresh(&self, token: &SessionToken) -> Result<Option<Session>, Error>;

    /// Observe login and logout notices.
    fn subscribe(&self) -> broadcast::Receiver<SessionChanged>;
}
