//! Request and response bodies for the `/api/v1` endpoints.
//!
//! Requests arrive either as `application/x-www-form-urlencoded` or JSON, so
//! every request field is optional text and numeric fields accept numbers or
//! numeric strings. Presence and format checks happen in the domain.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ContactForm, Error, FeedbackEntry, FeedbackForm, MenuSection, Rating, Reservation,
    ReservationForm, ReservationStatus, UserId, UserIdentity,
};

const MALFORMED_BODY_MESSAGE: &str = "Request body could not be read";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Body extractor accepting JSON or URL-encoded forms.
///
/// The `Content-Type` picks the decoder; anything that is not JSON is read
/// as a form. Decoding failures become `invalid_request` errors.
pub struct FormOrJson<T>(pub T);

impl<T> FormOrJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn is_json(req: &HttpRequest) -> bool {
    let content_type = req.content_type();
    content_type == "application/json" || content_type.ends_with("+json")
}

fn malformed_body(err: &actix_web::Error) -> Error {
    warn!(error = %err, "rejected malformed request body");
    Error::invalid_request(MALFORMED_BODY_MESSAGE)
}

impl<T> FromRequest for FormOrJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_json(req) {
            let fut = web::Json::<T>::from_request(req, payload);
            Box::pin(async move {
                fut.await
                    .map(|body| Self(body.into_inner()))
                    .map_err(|err| malformed_body(&err))
            })
        } else {
            let fut = web::Form::<T>::from_request(req, payload);
            Box::pin(async move {
                fut.await
                    .map(|body| Self(body.into_inner()))
                    .map_err(|err| malformed_body(&err))
            })
        }
    }
}

/// Integer that may arrive as a JSON number or as text.
///
/// Blank text counts as absent. Text that is not an integer counts as `0`,
/// which every numeric field rejects with its own range message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Int(i64),
    Text(String),
}

impl LenientInt {
    /// Integer value, or `None` for blank text.
    ///
    /// # Examples
    /// ```
    /// use siptalk::inbound::http::dto::LenientInt;
    ///
    /// assert_eq!(LenientInt::Text(" 4 ".into()).value(), Some(4));
    /// assert_eq!(LenientInt::Text(String::new()).value(), None);
    /// assert_eq!(LenientInt::Text("four".into()).value(), Some(0));
    /// ```
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse().unwrap_or(0))
                }
            }
        }
    }
}

fn lenient(value: Option<&LenientInt>) -> Option<i64> {
    value.and_then(LenientInt::value)
}

/// `POST /api/v1/register` body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default, alias = "fullname")]
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// `POST /api/v1/login` body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// `POST /api/v1/reservation` body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReservationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(example = "2026-03-01")]
    pub date: Option<String>,
    #[serde(default)]
    #[schema(example = "18:00")]
    pub time: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 2)]
    pub guests: Option<LenientInt>,
}

impl From<ReservationRequest> for ReservationForm {
    fn from(request: ReservationRequest) -> Self {
        Self {
            guests: lenient(request.guests.as_ref()),
            name: request.name,
            email: request.email,
            phone: request.phone,
            date: request.date,
            time: request.time,
        }
    }
}

/// `POST /api/v1/contact` body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactForm {
    fn from(request: ContactRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            message: request.message,
        }
    }
}

/// `POST /api/v1/feedback` body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 5)]
    pub rating: Option<LenientInt>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<FeedbackRequest> for FeedbackForm {
    fn from(request: FeedbackRequest) -> Self {
        Self {
            rating: lenient(request.rating.as_ref()),
            name: request.name,
            email: request.email,
            message: request.message,
        }
    }
}

/// `GET /api/v1/menu` query string.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// Restrict the listing to one category, e.g. `cold_coffee`.
    pub category: Option<String>,
}

/// Success body carrying only a message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    #[schema(example = "Registration successful! Please log in.")]
    pub message: String,
    pub user_id: UserId,
}

/// Login and session refresh body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
    pub user: UserIdentity,
}

/// `GET /api/v1/check_session` body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusResponse {
    pub success: bool,
    pub loggedin: bool,
    pub user: Option<UserIdentity>,
    /// Advisory: the session is older than one hour.
    pub stale: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationCreatedResponse {
    pub success: bool,
    #[schema(example = "Reservation successful! See you on 2026-03-01 at 18:00")]
    pub message: String,
    pub reservation_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2026-03-01")]
    pub date: NaiveDate,
    #[schema(example = "18:00")]
    pub time: String,
}

impl From<&Reservation> for ReservationCreatedResponse {
    fn from(reservation: &Reservation) -> Self {
        let date = reservation.date.format(DATE_FORMAT).to_string();
        let time = reservation.time.format(TIME_FORMAT).to_string();
        Self {
            success: true,
            message: format!("Reservation successful! See you on {date} at {time}"),
            reservation_id: reservation.id,
            date: reservation.date,
            time,
        }
    }
}

/// Reservation as listed to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationView {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            time: reservation.time.format(TIME_FORMAT).to_string(),
            name: reservation.name,
            email: reservation.email.into(),
            phone: reservation.phone,
            date: reservation.date,
            guests: reservation.guests,
            status: reservation.status,
            created_at: reservation.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationListResponse {
    pub success: bool,
    pub reservations: Vec<ReservationView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    #[schema(example = "Your message has been sent successfully!")]
    pub message: String,
    pub contact_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackCreatedResponse {
    pub success: bool,
    #[schema(example = "Thank you for your feedback!")]
    pub message: String,
    pub feedback_id: Uuid,
}

/// Feedback entry as listed publicly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub rating: Rating,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackEntry> for FeedbackView {
    fn from(entry: FeedbackEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            email: entry.email.into(),
            rating: entry.rating,
            message: entry.message,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackListResponse {
    pub success: bool,
    pub message: String,
    pub feedback: Vec<FeedbackView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuResponse {
    pub success: bool,
    pub categories: Vec<MenuSection>,
}
