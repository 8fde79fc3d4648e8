//! Contact and feedback form services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    ContactCommand, ContactRepository, ContactRepositoryError, FeedbackCommand, FeedbackQuery,
    FeedbackRepository, FeedbackRepositoryError,
};
use crate::domain::{
    ContactForm, ContactMessage, Error, FEEDBACK_LIST_LIMIT, FeedbackEntry, FeedbackForm,
};

const CONTACT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";
const FEEDBACK_FAILED_MESSAGE: &str = "Failed to submit feedback. Please try again.";
const FEEDBACK_LIST_FAILED_MESSAGE: &str = "Failed to load feedback. Please try again.";

fn storage_error(connection: bool, detail: &str, message: &str) -> Error {
    error!(%detail, "form repository failure");
    if connection {
        Error::service_unavailable(message)
    } else {
        Error::internal(message)
    }
}

/// Implements [`ContactCommand`].
#[derive(Clone)]
pub struct ContactService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> ContactCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn submit(&self, form: ContactForm) -> Result<ContactMessage, Error> {
        let message = ContactMessage::from_form(form, self.clock.utc())?;
        self.repo.save(&message).await.map_err(|err| match err {
            ContactRepositoryError::Connection { message: detail } => {
                storage_error(true, &detail, CONTACT_FAILED_MESSAGE)
            }
            ContactRepositoryError::Query { message: detail } => {
                storage_error(false, &detail, CONTACT_FAILED_MESSAGE)
            }
        })?;
        info!(contact_id = %message.id, "contact message stored");
        Ok(message)
    }
}

/// Implements [`FeedbackCommand`] and [`FeedbackQuery`].
#[derive(Clone)]
pub struct FeedbackService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FeedbackService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> FeedbackService<R>
where
    R: FeedbackRepository,
{
    fn map_repo_error(error: FeedbackRepositoryError, message: &str) -> Error {
        match error {
            FeedbackRepositoryError::Connection { message: detail } => {
                storage_error(true, &detail, message)
            }
            FeedbackRepositoryError::Query { message: detail } => {
                storage_error(false, &detail, message)
            }
        }
    }
}

#[async_trait]
impl<R> FeedbackCommand for FeedbackService<R>
where
    R: FeedbackRepository,
{
    async fn submit(&self, form: FeedbackForm) -> Result<FeedbackEntry, Error> {
        let entry = FeedbackEntry::from_form(form, self.clock.utc())?;
        self.repo
            .save(&entry)
            .await
            .map_err(|err| Self::map_repo_error(err, FEEDBACK_FAILED_MESSAGE))?;
        info!(feedback_id = %entry.id, rating = entry.rating.get(), "feedback stored");
        Ok(entry)
    }
}

#[async_trait]
impl<R> FeedbackQuery for FeedbackService<R>
where
    R: FeedbackRepository,
{
    async fn list_recent(&self) -> Result<Vec<FeedbackEntry>, Error> {
        self.repo
            .list_recent(FEEDBACK_LIST_LIMIT)
            .await
            .map_err(|err| Self::map_repo_error(err, FEEDBACK_LIST_FAILED_MESSAGE))
    }
}
