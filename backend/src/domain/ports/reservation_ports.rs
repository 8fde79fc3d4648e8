//! Driving ports for the reservation workflow.

use async_trait::async_trait;

use crate::domain::{Error, Reservation, ReservationForm, Session};

/// Submit reservation requests.
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Validate and store a reservation. With a session the row is owned by
    /// that user.
    async fn submit(
        &self,
        form: ReservationForm,
        session: Option<&Session>,
    ) -> Result<Reservation, Error>;
}

/// Read back a user's reservations.
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    /// Reservations owned by the session's user. Fails with `Unauthorized`
    /// when there is no session.
    async fn list_for_user(&self, session: Option<&Session>) -> Result<Vec<Reservation>, Error>;
}
