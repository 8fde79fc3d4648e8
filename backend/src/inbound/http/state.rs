//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised without storage.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AuthFacade, ContactCommand, ContactRepository, FeedbackCommand, FeedbackQuery,
    FeedbackRepository, PasswordHasher, ReservationCommand, ReservationQuery,
    ReservationRepository, SessionStore, UserRepository,
};
use crate::domain::{
    AuthService, ContactService, CredentialStore, FeedbackService, ReservationService,
    SessionEvents, SessionManager,
};

/// Port implementations used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthFacade>,
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservations_query: Arc<dyn ReservationQuery>,
    pub contact: Arc<dyn ContactCommand>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub feedback_query: Arc<dyn FeedbackQuery>,
    /// Time source for session staleness reported to clients.
    pub clock: Arc<dyn Clock>,
}

/// Driven adapters the services are built over.
pub struct StateAdapters<U, S, H, R, C, F> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub hasher: Arc<H>,
    pub reservations: Arc<R>,
    pub contacts: Arc<C>,
    pub feedback: Arc<F>,
}

impl HttpState {
    /// Wire the domain services over `adapters`, all reading time from
    /// `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use siptalk::inbound::http::state::{HttpState, StateAdapters};
    /// use siptalk::outbound::Argon2PasswordHasher;
    /// use siptalk::outbound::memory::{
    ///     MemoryContactRepository, MemoryFeedbackRepository, MemoryReservationRepository,
    ///     MemorySessionStore, MemoryUserRepository,
    /// };
    ///
    /// let state = HttpState::from_adapters(
    ///     StateAdapters {
    ///         users: Arc::new(MemoryUserRepository::default()),
    ///         sessions: Arc::new(MemorySessionStore::default()),
    ///         hasher: Arc::new(Argon2PasswordHasher::default()),
    ///         reservations: Arc::new(MemoryReservationRepository::default()),
    ///         contacts: Arc::new(MemoryContactRepository::default()),
    ///         feedback: Arc::new(MemoryFeedbackRepository::default()),
    ///     },
    ///     Arc::new(DefaultClock),
    /// );
    /// let _events = state.auth.subscribe();
    /// ```
    pub fn from_adapters<U, S, H, R, C, F>(
        adapters: StateAdapters<U, S, H, R, C, F>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        S: SessionStore + 'static,
        H: PasswordHasher + 'static,
        R: ReservationRepository + 'static,
        C: ContactRepository + 'static,
        F: FeedbackRepository + 'static,
    {
        let StateAdapters {
            users,
            sessions,
            hasher,
            reservations,
            contacts,
            feedback,
        } = adapters;

        let auth = AuthService::new(
            CredentialStore::new(users, hasher),
            SessionManager::new(sessions, Arc::clone(&clock)),
            SessionEvents::new(),
        );
        let reservation_service =
            Arc::new(ReservationService::new(reservations, Arc::clone(&clock)));
        let feedback_service = Arc::new(FeedbackService::new(feedback, Arc::clone(&clock)));

        Self {
            auth: Arc::new(auth),
            reservations: Arc::clone(&reservation_service) as Arc<dyn ReservationCommand>,
            reservations_query: reservation_service,
            contact: Arc::new(ContactService::new(contacts, Arc::clone(&clock))),
            feedback: Arc::clone(&feedback_service) as Arc<dyn FeedbackCommand>,
            feedback_query: feedback_service,
            clock,
        }
    }
}
