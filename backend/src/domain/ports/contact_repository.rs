//! Port abstraction for contact message persistence.
use async_trait::async_trait;

use crate::domain::ContactMessage;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact message.
    async fn save(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError>;
}
