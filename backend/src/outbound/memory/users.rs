use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User};

use super::lock;

/// Users keyed by normalised email.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users);
        if users.contains_key(user.email.as_str()) {
            return Err(UserPersistenceError::duplicate_email());
        }
        users.insert(user.email.as_str().to_owned(), user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users).get(email.as_str()).cloned())
    }
}
