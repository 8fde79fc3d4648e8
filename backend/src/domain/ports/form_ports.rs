//! Driving ports for the contact and feedback forms.

use async_trait::async_trait;

use crate::domain::{ContactForm, ContactMessage, Error, FeedbackEntry, FeedbackForm};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Validate and store a contact message.
    async fn submit(&self, form: ContactForm) -> Result<ContactMessage, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Validate and store a feedback entry.
    async fn submit(&self, form: FeedbackForm) -> Result<FeedbackEntry, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackQuery: Send + Sync {
    /// The newest feedback entries, newest first.
    async fn list_recent(&self) -> Result<Vec<FeedbackEntry>, Error>;
}
