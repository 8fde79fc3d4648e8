//! Auth facade service.
//!
//! Composes the [`CredentialStore`] and [`SessionManager`] behind the
//! [`AuthFacade`] driving port and announces session changes on
//! [`SessionEvents`].

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::info;

use crate::domain::ports::{AuthFacade, LoginOutcome, PasswordHasher, SessionStore, UserRepository};
use crate::domain::{
    CredentialStore, Error, LoginCredentials, Registration, Session, SessionChanged,
    SessionEvents, SessionManager, SessionToken, UserIdentity,
};

/// Auth facade backed by a user repository, a password hasher, and a
/// session store.
#[derive(Clone)]
pub struct AuthService<U, S, H> {
    credentials: CredentialStore<U, H>,
    sessions: SessionManager<S>,
    events: SessionEvents,
}

impl<U, S, H> AuthService<U, S, H> {
    /// Compose the facade from its parts.
    pub fn new(
        credentials: CredentialStore<U, H>,
        sessions: SessionManager<S>,
        events: SessionEvents,
    ) -> Self {
        Self {
            credentials,
            sessions,
            events,
        }
    }
}

#[async_trait]
impl<U, S, H> AuthFacade for AuthService<U, S, H>
where
    U: UserRepository,
    S: SessionStore,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<UserIdentity, Error> {
        let user = self.credentials.register(registration).await?;
        Ok(user.identity())
    }

    async fn login(
        &self,
        credentials: LoginCredentials,
        previous: Option<&SessionToken>,
    ) -> Result<LoginOutcome, Error> {
        let user = self.credentials.verify(&credentials).await?;
        if let Some(previous) = previous {
            self.sessions.destroy(previous).await?;
        }
        let (token, session) = self.sessions.establish(user.identity()).await?;
        info!(user_id = %session.user_id, "login succeeded");
        self.events.publish();
        Ok(LoginOutcome { token, session })
    }

    async fn logout(&self, token: Option<&SessionToken>) -> Result<(), Error> {
        if let Some(token) = token {
            self.sessions.destroy(token).await?;
        }
        self.events.publish();
        Ok(())
    }

    async fn current_user(&self, token: Option<&SessionToken>) -> Result<Option<Session>, Error> {
        match token {
            Some(token) => self.sessions.resolve(token).await,
            None => Ok(None),
        }
    }

    async fn refresh(&self, token: &SessionToken) -> Result<Option<Session>, Error> {
        self.sessions.refresh(token).await
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChanged> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
