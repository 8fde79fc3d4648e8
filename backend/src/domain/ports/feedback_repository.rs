//! Port abstraction for feedback persistence.
use async_trait::async_trait;

use crate::domain::FeedbackEntry;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert a new feedback entry.
    async fn save(&self, entry: &FeedbackEntry) -> Result<(), FeedbackRepositoryError>;

    /// At most `limit` entries, newest first.
    async fn list_recent(&self, limit: usize)
    -> Result<Vec<FeedbackEntry>, FeedbackRepositoryError>;
}
