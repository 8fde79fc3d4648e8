use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, FeedbackRepository, FeedbackRepositoryError,
};
use crate::domain::{ContactMessage, FeedbackEntry};

use super::lock;

#[derive(Debug, Default)]
pub struct MemoryContactRepository {
    messages: Mutex<Vec<ContactMessage>>,
}

impl MemoryContactRepository {
    /// Number of stored messages.
    pub fn len(&self) -> usize {
        lock(&self.messages).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn save(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        lock(&self.messages).push(message.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryFeedbackRepository {
    entries: Mutex<Vec<FeedbackEntry>>,
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackRepository {
    async fn save(&self, entry: &FeedbackEntry) -> Result<(), FeedbackRepositoryError> {
        lock(&self.entries).push(entry.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, FeedbackRepositoryError> {
        let mut entries = lock(&self.entries).clone();
        // Later inserts win timestamp ties.
        entries.reverse();
        entries.sort_by_key(|entry| Reverse(entry.created_at));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, Rating};
    use chrono::{TimeDelta, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn feedback_listing_is_newest_first_and_capped() {
        let repo = MemoryFeedbackRepository::default();
        let start = Utc::now();
        for minutes in 0..60 {
            let entry = FeedbackEntry {
                id: Uuid::new_v4(),
                name: format!("Guest {minutes}"),
                email: EmailAddress::new("guest@example.com").expect("email"),
                rating: Rating::new(5).expect("rating"),
                message: "Lovely place to study".to_owned(),
                created_at: start + TimeDelta::minutes(minutes),
            };
            repo.save(&entry).await.expect("save");
        }

        let listed = repo.list_recent(50).await.expect("list");
        assert_eq!(listed.len(), 50);
        assert_eq!(listed[0].name, "Guest 59");
        assert_eq!(listed[49].name, "Guest 10");
    }
}
