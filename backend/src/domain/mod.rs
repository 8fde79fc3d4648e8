//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload and its code.
//! - User, UserIdentity, Registration, LoginCredentials: account model.
//! - Session, SessionToken, SessionEvents: server-side session model.
//! - Reservation, ContactMessage, FeedbackEntry: customer submissions.
//! - MenuSection: static menu catalogue.
//! - AuthService, ReservationService, ContactService, FeedbackService:
//!   driving port implementations generic over their repositories.

pub mod auth;
pub mod auth_service;
pub mod contact;
pub mod credential_store;
pub mod error;
pub mod feedback;
pub mod form_services;
pub mod menu;
pub mod ports;
pub mod reservation;
pub mod reservation_service;
pub mod session;
pub mod session_manager;
pub mod trace_id;
pub mod user;
mod validation;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_CHARS, PasswordDigest, PlainPassword,
    Registration, RegistrationValidationError,
};
pub use self::auth_service::AuthService;
pub use self::contact::{ContactForm, ContactMessage, ContactValidationError};
pub use self::credential_store::CredentialStore;
pub use self::error::{Error, ErrorCode};
pub use self::feedback::{
    FEEDBACK_LIST_LIMIT, FeedbackEntry, FeedbackForm, FeedbackValidationError, Rating,
};
pub use self::form_services::{ContactService, FeedbackService};
pub use self::menu::{
    MenuCategory, MenuItem, MenuSection, STANDARD_PRICE_PHP, UnknownMenuCategory, menu_sections,
};
pub use self::reservation::{
    GUESTS_DEFAULT, GUESTS_MAX, GUESTS_MIN, Reservation, ReservationDraft, ReservationForm,
    ReservationStatus, ReservationValidationError, UnknownReservationStatus,
};
pub use self::reservation_service::ReservationService;
pub use self::session::{
    SESSION_STALE_AFTER, Session, SessionChanged, SessionEvents, SessionToken,
};
pub use self::session_manager::SessionManager;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, FullName, User, UserId, UserIdentity, UserValidationError};
pub use self::validation::MESSAGE_MIN_CHARS;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use siptalk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Please login to view reservations"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
