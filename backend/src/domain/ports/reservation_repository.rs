//! Port abstraction for reservation persistence.
use async_trait::async_trait;

use crate::domain::{Reservation, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reservation repository adapters.
    pub enum ReservationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reservation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reservation repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation row.
    async fn save(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError>;

    /// Every reservation owned by `user_id`, newest date then newest time
    /// first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError>;
}
