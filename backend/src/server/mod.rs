//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::{build_health_probe, build_http_state};

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tracing::{debug, warn};

use siptalk::Trace;
#[cfg(debug_assertions)]
use siptalk::doc::ApiDoc;
use siptalk::domain::{SessionChanged, TRACE_ID_HEADER};
use siptalk::inbound::http::configure_api;
use siptalk::inbound::http::health::{HealthState, health, live, ready};
use siptalk::inbound::http::session_config::SessionSettings;
use siptalk::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

const CORS_MAX_AGE_SECS: usize = 3600;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
    frontend_origin: String,
}

/// Single-origin policy with credentials; pre-flights get an empty 200.
fn cors_policy(frontend_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_origin)
        .allowed_methods(["GET", "POST", "OPTIONS"])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .supports_credentials()
        .max_age(CORS_MAX_AGE_SECS)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
        frontend_origin,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(health)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(cors_policy(&frontend_origin)).wrap(Trace)
}

/// Log session change notices until the channel closes.
async fn log_session_changes(mut events: Receiver<SessionChanged>) {
    loop {
        match events.recv().await {
            Ok(SessionChanged) => debug!("session state changed"),
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "session change logger fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Construct an Actix HTTP server using the provided configuration.
///
/// Returns the server together with its health state so the caller can flip
/// liveness during shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<(Server, web::Data<HealthState>)> {
    let health_state = web::Data::new(HealthState::new(
        build_health_probe(&config),
        Arc::new(DefaultClock),
    ));
    let http_state = build_http_state(&config);
    actix_web::rt::spawn(log_session_changes(http_state.auth.subscribe()));

    let ServerConfig {
        session,
        bind_addr,
        frontend_origin,
        db_pool: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
            frontend_origin: frontend_origin.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok((server, health_state))
}
