//! Registration, login, and session lifecycle handlers.
//!
//! ```text
//! POST /api/v1/register {"full_name":"Jane Doe","email":"jane@example.com","password":"secret1"}
//! POST /api/v1/login {"email":"jane@example.com","password":"secret1"}
//! POST /api/v1/logout
//! GET /api/v1/check_session
//! POST /api/v1/session/refresh
//! ```

use actix_web::{HttpResponse, get, post, route, web};
use tracing::warn;

use crate::domain::{ApiResult, Error, LoginCredentials, Registration, Session};
use crate::inbound::http::dto::{
    FormOrJson, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse,
    SessionStatusResponse, UserResponse,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const REGISTERED_MESSAGE: &str = "Registration successful! Please log in.";
const LOGIN_MESSAGE: &str = "Login successful";
const LOGOUT_MESSAGE: &str = "Logged out successfully";
const REFRESHED_MESSAGE: &str = "Session refreshed";
const REFRESH_REQUIRES_LOGIN: &str = "Please login to continue";

/// Resolve the cookie's token to a live session.
///
/// A token whose session no longer exists purges the cookie.
pub(crate) async fn current_session(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<Option<Session>> {
    let Some(token) = session.token()? else {
        return Ok(None);
    };
    let resolved = state.auth.current_user(Some(&token)).await?;
    if resolved.is_none() {
        session.purge();
    }
    Ok(resolved)
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body(
        content = RegisterRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: FormOrJson<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        full_name,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(full_name, email, password)?;
    let identity = state.auth.register(registration).await?;
    Ok(HttpResponse::Ok().json(RegisterResponse {
        success: true,
        message: REGISTERED_MESSAGE.to_owned(),
        user_id: identity.id,
    }))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body(
        content = LoginRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (
            status = 200,
            description = "Login success",
            body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Missing or malformed fields", body = ErrorEnvelope),
        (status = 401, description = "Unknown email or wrong password", body = ErrorEnvelope),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: FormOrJson<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(email, password)?;
    let previous = session.token().unwrap_or_else(|err| {
        warn!(error = %err, "unreadable session cookie during login");
        None
    });
    let outcome = state.auth.login(credentials, previous.as_ref()).await?;
    session.persist_token(&outcome.token)?;
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        message: LOGIN_MESSAGE.to_owned(),
        user: outcome.session.identity(),
    }))
}

/// End the session. Succeeds whether or not one exists.
#[utoipa::path(
    method(get, post),
    path = "/api/v1/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse)),
    tags = ["auth"],
    operation_id = "logout"
)]
#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let token = session.token().unwrap_or_else(|err| {
        warn!(error = %err, "unreadable session cookie during logout");
        None
    });
    session.purge();
    if let Err(err) = state.auth.logout(token.as_ref()).await {
        warn!(error = %err, "session record could not be removed during logout");
    }
    HttpResponse::Ok().json(MessageResponse::ok(LOGOUT_MESSAGE))
}

/// Report whether the caller has an active session.
#[utoipa::path(
    get,
    path = "/api/v1/check_session",
    responses(
        (status = 200, description = "Session status", body = SessionStatusResponse),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "checkSession"
)]
#[get("/check_session")]
pub async fn check_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let resolved = current_session(&state, &session).await?;
    let now = state.clock.utc();
    Ok(HttpResponse::Ok().json(SessionStatusResponse {
        success: true,
        loggedin: resolved.is_some(),
        stale: resolved.as_ref().is_some_and(|s| s.is_stale(now)),
        user: resolved.map(|s| s.identity()),
    }))
}

/// Restart the staleness clock of the current session.
#[utoipa::path(
    post,
    path = "/api/v1/session/refresh",
    responses(
        (status = 200, description = "Session refreshed", body = UserResponse),
        (status = 401, description = "No active session", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "refreshSession"
)]
#[post("/session/refresh")]
pub async fn refresh_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(token) = session.token()? else {
        return Err(Error::unauthorized(REFRESH_REQUIRES_LOGIN));
    };
    let Some(refreshed) = state.auth.refresh(&token).await? else {
        session.purge();
        return Err(Error::unauthorized(REFRESH_REQUIRES_LOGIN));
    };
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        message: REFRESHED_MESSAGE.to_owned(),
        user: refreshed.identity(),
    }))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
