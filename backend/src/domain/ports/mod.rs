//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the session store, the password hasher, and
//! the health probe) expose strongly typed errors so adapters map their
//! failures into predictable variants. Driving ports return the domain
//! [`Error`](crate::domain::Error) directly.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_facade;
mod contact_repository;
mod feedback_repository;
mod form_ports;
mod health_probe;
mod password_hasher;
mod reservation_ports;
mod reservation_repository;
mod session_store;
mod user_repository;

pub use auth_facade::{AuthFacade, LoginOutcome};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError};
#[cfg(test)]
pub use form_ports::{MockContactCommand, MockFeedbackCommand, MockFeedbackQuery};
pub use form_ports::{ContactCommand, FeedbackCommand, FeedbackQuery};
#[cfg(test)]
pub use health_probe::MockHealthProbe;
pub use health_probe::{DatabaseStatus, HealthProbe, NotConfiguredHealthProbe};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use reservation_ports::{ReservationCommand, ReservationQuery};
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use reservation_repository::{ReservationRepository, ReservationRepositoryError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
