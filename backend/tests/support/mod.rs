//! Shared harness for HTTP integration tests over the in-memory adapters.

use std::sync::{Arc, Mutex, PoisonError};

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test::TestRequest, web};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use siptalk::Trace;
use siptalk::domain::ports::NotConfiguredHealthProbe;
use siptalk::inbound::http::configure_api;
use siptalk::inbound::http::health::{HealthState, health, live, ready};
use siptalk::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use siptalk::inbound::http::state::{HttpState, StateAdapters};
use siptalk::outbound::Argon2PasswordHasher;
use siptalk::outbound::memory::{
    MemoryContactRepository, MemoryFeedbackRepository, MemoryReservationRepository,
    MemorySessionStore, MemoryUserRepository,
};

pub const JANE_NAME: &str = "Jane Doe";
pub const JANE_EMAIL: &str = "jane@example.com";
pub const JANE_PASSWORD: &str = "secret1";

/// Clock the tests move forward explicitly.
pub struct AdjustableClock {
    now: Mutex<DateTime<Utc>>,
}

impl AdjustableClock {
    pub fn starting_now() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for AdjustableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Application state plus handles on the adapters behind it.
pub struct Harness {
    pub state: HttpState,
    pub health: web::Data<HealthState>,
    pub reservations: Arc<MemoryReservationRepository>,
    pub contacts: Arc<MemoryContactRepository>,
    pub clock: Arc<AdjustableClock>,
    session: SessionSettings,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(AdjustableClock::starting_now());
        let reservations = Arc::new(MemoryReservationRepository::default());
        let contacts = Arc::new(MemoryContactRepository::default());
        let hasher = Argon2PasswordHasher::with_params(1024, 1, 1).expect("test hasher params");
        let state = HttpState::from_adapters(
            StateAdapters {
                users: Arc::new(MemoryUserRepository::default()),
                sessions: Arc::new(MemorySessionStore::default()),
                hasher: Arc::new(hasher),
                reservations: Arc::clone(&reservations),
                contacts: Arc::clone(&contacts),
                feedback: Arc::new(MemoryFeedbackRepository::default()),
            },
            clock.clone(),
        );
        let health_state = web::Data::new(HealthState::new(
            Arc::new(NotConfiguredHealthProbe),
            clock.clone(),
        ));
        health_state.mark_ready();
        Self {
            state,
            health: health_state,
            reservations,
            contacts,
            clock,
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
        }
    }

    /// The production route layout: traced, with sessions on `/api/v1`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .app_data(self.health.clone())
            .service(
                web::scope("/api/v1")
                    .wrap(self.session.middleware())
                    .configure(configure_api),
            )
            .service(health)
            .service(ready)
            .service(live)
            .wrap(Trace)
    }
}

pub fn register_request(full_name: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/api/v1/register").set_form([
        ("full_name", full_name),
        ("email", email),
        ("password", password),
    ])
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/login")
        .set_form([("email", email), ("password", password)])
}

/// Session cookie set by a response, ready to attach to the next request.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}
