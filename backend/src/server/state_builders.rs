//! Builders selecting Diesel or in-memory adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use siptalk::domain::ports::{HealthProbe, NotConfiguredHealthProbe};
use siptalk::inbound::http::state::{HttpState, StateAdapters};
use siptalk::outbound::Argon2PasswordHasher;
use siptalk::outbound::memory::{
    MemoryContactRepository, MemoryFeedbackRepository, MemoryReservationRepository,
    MemorySessionStore, MemoryUserRepository,
};
use siptalk::outbound::persistence::{
    DbPool, DieselContactRepository, DieselFeedbackRepository, DieselHealthProbe,
    DieselReservationRepository, DieselSessionStore, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_adapters(
        StateAdapters {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            sessions: Arc::new(DieselSessionStore::new(pool.clone())),
            hasher: Arc::new(Argon2PasswordHasher::default()),
            reservations: Arc::new(DieselReservationRepository::new(pool.clone())),
            contacts: Arc::new(DieselContactRepository::new(pool.clone())),
            feedback: Arc::new(DieselFeedbackRepository::new(pool.clone())),
        },
        clock,
    )
}

fn memory_state(clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_adapters(
        StateAdapters {
            users: Arc::new(MemoryUserRepository::default()),
            sessions: Arc::new(MemorySessionStore::default()),
            hasher: Arc::new(Argon2PasswordHasher::default()),
            reservations: Arc::new(MemoryReservationRepository::default()),
            contacts: Arc::new(MemoryContactRepository::default()),
            feedback: Arc::new(MemoryFeedbackRepository::default()),
        },
        clock,
    )
}

/// Build the shared HTTP state, using the database when a pool is
/// configured and in-process storage otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool, clock),
        None => {
            warn!("no database configured; accounts and submissions are kept in memory");
            memory_state(clock)
        }
    };
    web::Data::new(state)
}

/// Probe reporting database reachability for `/health`.
pub(super) fn build_health_probe(config: &ServerConfig) -> Arc<dyn HealthProbe> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselHealthProbe::new(pool.clone())),
        None => Arc::new(NotConfiguredHealthProbe),
    }
}
