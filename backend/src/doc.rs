//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response bodies they exchange, and the session cookie
//! security scheme. The document is served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::DatabaseStatus;
use crate::domain::{
    Error, ErrorCode, MenuCategory, MenuItem, MenuSection, ReservationStatus, UserIdentity,
};
use crate::inbound::http::dto::{
    ContactRequest, ContactResponse, FeedbackCreatedResponse, FeedbackListResponse,
    FeedbackRequest, FeedbackView, LoginRequest, MenuResponse, MessageResponse, RegisterRequest,
    RegisterResponse, ReservationCreatedResponse, ReservationListResponse, ReservationRequest,
    ReservationView, SessionStatusResponse, UserResponse,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::{HealthReport, HealthStatus};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SipTalk backend API",
        description = "Accounts, reservations, contact and feedback forms, and the menu for the SipTalk coffee shop."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::check_session,
        crate::inbound::http::auth::refresh_session,
        crate::inbound::http::reservations::create_reservation,
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::forms::submit_contact,
        crate::inbound::http::forms::submit_feedback,
        crate::inbound::http::forms::list_feedback,
        crate::inbound::http::menu::list_menu,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ErrorEnvelope,
        UserIdentity,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        UserResponse,
        MessageResponse,
        SessionStatusResponse,
        ReservationRequest,
        ReservationCreatedResponse,
        ReservationStatus,
        ReservationView,
        ReservationListResponse,
        ContactRequest,
        ContactResponse,
        FeedbackRequest,
        FeedbackCreatedResponse,
        FeedbackView,
        FeedbackListResponse,
        MenuCategory,
        MenuItem,
        MenuSection,
        MenuResponse,
        HealthStatus,
        HealthReport,
        DatabaseStatus,
    )),
    tags(
        (name = "auth", description = "Registration, login, and sessions"),
        (name = "reservations", description = "Table reservations"),
        (name = "forms", description = "Contact messages and customer feedback"),
        (name = "menu", description = "Static menu catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
