//! Table reservation model and submission rules.
//!
//! ## Invariants
//! - `guests` is within [`GUESTS_MIN`]..=[`GUESTS_MAX`].
//! - `date` is not before the calendar day the reservation was submitted;
//!   the time of day is not compared.
//! - New reservations are always [`ReservationStatus::Pending`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{RequiredFields, field_error, missing_fields_error};
use super::{EmailAddress, Error, UserId};

/// Smallest accepted party size.
pub const GUESTS_MIN: i64 = 1;
/// Largest accepted party size.
pub const GUESTS_MAX: i64 = 20;
/// Party size assumed when the form omits it.
pub const GUESTS_DEFAULT: i64 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Lifecycle state of a reservation.
///
/// Only `Pending` is ever assigned here; the other states exist for staff
/// tooling that edits rows directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownReservationStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownReservationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownReservationStatus(other.to_owned())),
        }
    }
}

/// Raw reservation form values as submitted by a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<i64>,
}

/// Reasons a reservation is refused. Validation stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationValidationError {
    #[error("All fields are required")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Number of guests must be between 1 and 20")]
    GuestsOutOfRange { guests: i64 },
    #[error("Invalid reservation date")]
    InvalidDate,
    #[error("Invalid reservation time")]
    InvalidTime,
    #[error("Cannot book reservation in the past")]
    DateInPast { date: NaiveDate, today: NaiveDate },
}

impl From<ReservationValidationError> for Error {
    fn from(value: ReservationValidationError) -> Self {
        let message = value.to_string();
        match value {
            ReservationValidationError::MissingFields { fields } => {
                missing_fields_error(message, &fields)
            }
            ReservationValidationError::InvalidEmail => {
                field_error(message, "email", "invalid_email")
            }
            ReservationValidationError::GuestsOutOfRange { guests } => {
                Self::invalid_request(message).with_details(json!({
                    "field": "guests",
                    "code": "guests_out_of_range",
                    "value": guests,
                    "min": GUESTS_MIN,
                    "max": GUESTS_MAX,
                }))
            }
            ReservationValidationError::InvalidDate => {
                field_error(message, "date", "invalid_date")
            }
            ReservationValidationError::InvalidTime => {
                field_error(message, "time", "invalid_time")
            }
            ReservationValidationError::DateInPast { date, today } => {
                Self::invalid_request(message).with_details(json!({
                    "field": "date",
                    "code": "date_in_past",
                    "value": date.format(DATE_FORMAT).to_string(),
                    "today": today.format(DATE_FORMAT).to_string(),
                }))
            }
        }
    }
}

/// A reservation request that passed every submission rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: i32,
}

impl ReservationDraft {
    /// Validate `form` against the submission rules, using `today` as the
    /// earliest bookable calendar day.
    ///
    /// Checks run in order: required fields, email format, guest range, then
    /// date and time parsing and the past-date rule.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use siptalk::domain::{ReservationDraft, ReservationForm};
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    /// let form = ReservationForm {
    ///     name: Some("Jane Doe".into()),
    ///     email: Some("jane@example.com".into()),
    ///     phone: Some("555-0100".into()),
    ///     date: Some("2026-03-01".into()),
    ///     time: Some("18:00".into()),
    ///     guests: Some(2),
    /// };
    /// let draft = ReservationDraft::validate(form, today).expect("same-day booking is allowed");
    /// assert_eq!(draft.guests, 2);
    /// ```
    pub fn validate(
        form: ReservationForm,
        today: NaiveDate,
    ) -> Result<Self, ReservationValidationError> {
        let ReservationForm {
            name,
            email,
            phone,
            date,
            time,
            guests,
        } = form;

        let mut fields = RequiredFields::new();
        let name = fields.text("name", name);
        let email = fields.text("email", email);
        let phone = fields.text("phone", phone);
        let date = fields.text("date", date);
        let time = fields.text("time", time);
        fields
            .finish()
            .map_err(|fields| ReservationValidationError::MissingFields { fields })?;

        let email = EmailAddress::as_submitted(email)
            .map_err(|_| ReservationValidationError::InvalidEmail)?;
        let guests = parse_guests(guests.unwrap_or(GUESTS_DEFAULT))?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|_| ReservationValidationError::InvalidDate)?;
        let time = parse_time(&time)?;
        if date < today {
            return Err(ReservationValidationError::DateInPast { date, today });
        }

        Ok(Self {
            name,
            email,
            phone,
            date,
            time,
            guests,
        })
    }
}

fn parse_guests(guests: i64) -> Result<i32, ReservationValidationError> {
    if !(GUESTS_MIN..=GUESTS_MAX).contains(&guests) {
        return Err(ReservationValidationError::GuestsOutOfRange { guests });
    }
    i32::try_from(guests).map_err(|_| ReservationValidationError::GuestsOutOfRange { guests })
}

fn parse_time(raw: &str) -> Result<NaiveTime, ReservationValidationError> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .ok_or(ReservationValidationError::InvalidTime)
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Turn a validated draft into a pending reservation.
    #[must_use]
    pub fn from_draft(
        draft: ReservationDraft,
        user_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ReservationDraft {
            name,
            email,
            phone,
            date,
            time,
            guests,
        } = draft;
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            email,
            phone,
            date,
            time,
            guests,
            status: ReservationStatus::Pending,
            created_at,
        }
    }
}
