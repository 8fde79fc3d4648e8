//! Session cookie helpers that keep handlers free of framework details.
//!
//! The cookie carries only the opaque [`SessionToken`]. Handlers pass that
//! token to the auth facade, which resolves it against the session store.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{error, warn};

use crate::domain::{Error, SessionToken};

pub(crate) const SESSION_TOKEN_KEY: &str = "session_token";
const SESSION_FAILED_MESSAGE: &str = "Session could not be updated. Please try again.";

/// Newtype over the Actix session exposing token-level operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `token` in the cookie, rotating the cookie first.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.as_str())
            .map_err(|err| {
                error!(error = %err, "failed to persist session token");
                Error::internal(SESSION_FAILED_MESSAGE)
            })
    }

    /// Token from the cookie, if present and well formed.
    ///
    /// A malformed token is treated as absent.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self.0.get::<String>(SESSION_TOKEN_KEY).map_err(|err| {
            error!(error = %err, "failed to read session cookie");
            Error::internal(SESSION_FAILED_MESSAGE)
        })?;
        Ok(raw.and_then(|value| {
            let parsed = SessionToken::parse(&value);
            if parsed.is_none() {
                warn!("ignoring malformed session token in cookie");
            }
            parsed
        }))
    }

    /// Remove all session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{SESSION_COOKIE, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn read_token(session: SessionContext) -> Result<HttpResponse, Error> {
        Ok(match session.token()? {
            Some(token) => HttpResponse::Ok().body(token.as_str().to_owned()),
            None => HttpResponse::NoContent().finish(),
        })
    }

    #[actix_web::test]
    async fn round_trips_session_token() {
        let token = SessionToken::generate();
        let expected = token.as_str().to_owned();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(move |session: SessionContext| {
                        let token = token.clone();
                        async move {
                            session.persist_token(&token)?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        }
                    }),
                )
                .route("/get", web::get().to(read_token)),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .expect("session cookie set")
            .into_owned();
        assert!(!cookie.value().contains(&expected), "token must not be readable");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        assert_eq!(test::read_body(get_res).await, expected.as_bytes());
    }

    #[actix_web::test]
    async fn absent_cookie_has_no_token() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/get", web::get().to(read_token)),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn malformed_token_is_ignored() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(SESSION_TOKEN_KEY, "not-a-token")
                            .expect("insert raw value");
                        HttpResponse::Ok()
                    }),
                )
                .route("/get", web::get().to(read_token)),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
