use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{Session, SessionToken};

use super::lock;

/// Sessions keyed by token digest.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(
        &self,
        token: &SessionToken,
        session: &Session,
    ) -> Result<(), SessionStoreError> {
        lock(&self.sessions).insert(token.digest(), session.clone());
        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError> {
        Ok(lock(&self.sessions).get(&token.digest()).cloned())
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        lock(&self.sessions).remove(&token.digest());
        Ok(())
    }

    async fn touch(
        &self,
        token: &SessionToken,
        established_at: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionStoreError> {
        let mut sessions = lock(&self.sessions);
        Ok(sessions.get_mut(&token.digest()).map(|session| {
            session.established_at = established_at;
            session.clone()
        }))
    }
}
