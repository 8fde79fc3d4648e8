//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use super::configure_api;
use super::state::{HttpState, StateAdapters};
use crate::outbound::Argon2PasswordHasher;
use crate::outbound::memory::{
    MemoryContactRepository, MemoryFeedbackRepository, MemoryReservationRepository,
    MemorySessionStore, MemoryUserRepository,
};

/// Cookie name used by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and the `Secure` flag disabled so
/// plain HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// State wired over in-memory adapters with a cheap Argon2 configuration.
pub fn memory_state() -> HttpState {
    let hasher = Argon2PasswordHasher::with_params(1024, 1, 1).expect("test hasher params");
    HttpState::from_adapters(
        StateAdapters {
            users: Arc::new(MemoryUserRepository::default()),
            sessions: Arc::new(MemorySessionStore::default()),
            hasher: Arc::new(hasher),
            reservations: Arc::new(MemoryReservationRepository::default()),
            contacts: Arc::new(MemoryContactRepository::default()),
            feedback: Arc::new(MemoryFeedbackRepository::default()),
        },
        Arc::new(DefaultClock),
    )
}

/// Test app exposing the `/api/v1` scope over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Session cookie from a response, ready to attach to the next request.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}
