//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate request bodies into domain values, call the driving
//! ports held in [`state::HttpState`], and map failures through
//! [`error`]. Everything under `/api/v1` is registered by [`configure_api`];
//! the health probes sit at the root.

pub mod auth;
pub mod dto;
pub mod error;
pub mod forms;
pub mod health;
pub mod menu;
pub mod reservations;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

/// Register every `/api/v1` handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use siptalk::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::check_session)
        .service(auth::refresh_session)
        .service(reservations::create_reservation)
        .service(reservations::list_reservations)
        .service(forms::submit_contact)
        .service(forms::submit_feedback)
        .service(forms::list_feedback)
        .service(menu::list_menu);
}
