//! Reservation workflow service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    ReservationCommand, ReservationQuery, ReservationRepository, ReservationRepositoryError,
};
use crate::domain::{Error, Reservation, ReservationDraft, ReservationForm, Session};

const SUBMIT_FAILED_MESSAGE: &str = "Failed to create reservation. Please try again.";
const LIST_FAILED_MESSAGE: &str = "Failed to load reservations. Please try again.";
pub(crate) const LOGIN_REQUIRED_MESSAGE: &str = "Please login to view reservations";

/// Implements [`ReservationCommand`] and [`ReservationQuery`].
///
/// "Today" is the calendar day of the injected clock's local time.
#[derive(Clone)]
pub struct ReservationService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ReservationService<R> {
    /// Create a service over `repo`.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use siptalk::domain::ReservationService;
    /// # use siptalk::outbound::memory::MemoryReservationRepository;
    /// let service = ReservationService::new(
    ///     Arc::new(MemoryReservationRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ReservationService<R>
where
    R: ReservationRepository,
{
    fn map_repo_error(error: ReservationRepositoryError, message: &str) -> Error {
        match error {
            ReservationRepositoryError::Connection { message: detail } => {
                error!(%detail, "reservation repository unavailable");
                Error::service_unavailable(message)
            }
            ReservationRepositoryError::Query { message: detail } => {
                error!(%detail, "reservation repository query failed");
                Error::internal(message)
            }
        }
    }
}

#[async_trait]
impl<R> ReservationCommand for ReservationService<R>
where
    R: ReservationRepository,
{
    async fn submit(
        &self,
        form: ReservationForm,
        session: Option<&Session>,
    ) -> Result<Reservation, Error> {
        let today = self.clock.local().date_naive();
        let draft = ReservationDraft::validate(form, today)?;
        let reservation =
            Reservation::from_draft(draft, session.map(|s| s.user_id), self.clock.utc());
        self.repo
            .save(&reservation)
            .await
            .map_err(|err| Self::map_repo_error(err, SUBMIT_FAILED_MESSAGE))?;
        info!(
            reservation_id = %reservation.id,
            guests = reservation.guests,
            signed_in = reservation.user_id.is_some(),
            "reservation created"
        );
        Ok(reservation)
    }
}

#[async_trait]
impl<R> ReservationQuery for ReservationService<R>
where
    R: ReservationRepository,
{
    async fn list_for_user(&self, session: Option<&Session>) -> Result<Vec<Reservation>, Error> {
        let Some(session) = session else {
            return Err(Error::unauthorized(LOGIN_REQUIRED_MESSAGE));
        };
        self.repo
            .list_for_user(&session.user_id)
            .await
            .map_err(|err| Self::map_repo_error(err, LIST_FAILED_MESSAGE))
    }
}

#[cfg(test)]
#[path = "reservation_service_tests.rs"]
mod tests;
