//! Session manager: opens, resolves, refreshes, and closes server-side
//! sessions.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{Error, Session, SessionToken, UserIdentity};

const SESSION_FAILED_MESSAGE: &str = "Session could not be processed. Please try again.";

/// Session lifecycle over a [`SessionStore`].
#[derive(Clone)]
pub struct SessionManager<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SessionManager<S> {
    /// Create a manager reading time from `clock`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Current UTC instant according to the injected clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.utc()
    }
}

impl<S> SessionManager<S>
where
    S: SessionStore,
{
    fn map_store_error(error: SessionStoreError) -> Error {
        match error {
            SessionStoreError::Connection { message } => {
                error!(detail = %message, "session store unavailable");
                Error::service_unavailable(SESSION_FAILED_MESSAGE)
            }
            SessionStoreError::Query { message } => {
                error!(detail = %message, "session store query failed");
                Error::internal(SESSION_FAILED_MESSAGE)
            }
        }
    }

    /// Open a session for `identity` under a fresh token.
    pub async fn establish(
        &self,
        identity: UserIdentity,
    ) -> Result<(SessionToken, Session), Error> {
        let token = SessionToken::generate();
        let session = Session::for_identity(identity, self.clock.utc());
        self.store
            .insert(&token, &session)
            .await
            .map_err(Self::map_store_error)?;
        debug!(user_id = %session.user_id, "session established");
        Ok((token, session))
    }

    /// Look up the session behind `token`.
    pub async fn resolve(&self, token: &SessionToken) -> Result<Option<Session>, Error> {
        self.store.find(token).await.map_err(Self::map_store_error)
    }

    /// Close the session behind `token`. Closing an unknown token succeeds.
    pub async fn destroy(&self, token: &SessionToken) -> Result<(), Error> {
        self.store.remove(token).await.map_err(Self::map_store_error)
    }

    /// Restart the staleness clock for `token`.
    pub async fn refresh(&self, token: &SessionToken) -> Result<Option<Session>, Error> {
        self.store
            .touch(token, self.clock.utc())
            .await
            .map_err(Self::map_store_error)
    }
}
