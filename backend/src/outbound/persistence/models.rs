//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live next to
//! each row so corrupted rows surface as query errors.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    ContactMessage, EmailAddress, FeedbackEntry, FullName, PasswordDigest, Rating, Reservation,
    ReservationStatus, Session, User, UserId,
};

use super::schema::{contacts, feedback, reservations, sessions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            full_name: FullName::new(&row.full_name)
                .map_err(|err| format!("invalid full name in database: {err}"))?,
            email: EmailAddress::new(&row.email)
                .map_err(|err| format!("invalid email in database: {err}"))?,
            password: PasswordDigest::new(row.password_hash),
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            full_name: user.full_name.as_str(),
            email: user.email.as_str(),
            password_hash: user.password.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub established_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for Session {
    type Error = String;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::from_uuid(row.user_id),
            full_name: FullName::new(&row.full_name)
                .map_err(|err| format!("invalid session name: {err}"))?,
            email: EmailAddress::new(&row.email)
                .map_err(|err| format!("invalid session email: {err}"))?,
            established_at: row.established_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub token_hash: &'a str,
    pub user_id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub established_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Reservation models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReservationRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guests: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = String;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id.map(UserId::from_uuid),
            name: row.name,
            email: EmailAddress::as_submitted(&row.email)
                .map_err(|err| format!("invalid reservation email: {err}"))?,
            phone: row.phone,
            date: row.reservation_date,
            time: row.reservation_time,
            guests: row.guests,
            status: row
                .status
                .parse::<ReservationStatus>()
                .map_err(|err| err.to_string())?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub(crate) struct NewReservationRow<'a> {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guests: i32,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Reservation> for NewReservationRow<'a> {
    fn from(reservation: &'a Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id.map(|id| *id.as_uuid()),
            name: &reservation.name,
            email: reservation.email.as_str(),
            phone: &reservation.phone,
            reservation_date: reservation.date,
            reservation_time: reservation.time,
            guests: reservation.guests,
            status: reservation.status.as_str(),
            created_at: reservation.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Form models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a ContactMessage> for NewContactRow<'a> {
    fn from(message: &'a ContactMessage) -> Self {
        Self {
            id: message.id,
            name: &message.name,
            email: message.email.as_str(),
            message: &message.message,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub rating: i16,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for FeedbackEntry {
    type Error = String;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            email: EmailAddress::as_submitted(&row.email)
                .map_err(|err| format!("invalid feedback email: {err}"))?,
            rating: Rating::new(i64::from(row.rating)).map_err(|err| err.to_string())?,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedback)]
pub(crate) struct NewFeedbackRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub rating: i16,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a FeedbackEntry> for NewFeedbackRow<'a> {
    fn from(entry: &'a FeedbackEntry) -> Self {
        Self {
            id: entry.id,
            name: &entry.name,
            email: entry.email.as_str(),
            rating: entry.rating.get(),
            message: &entry.message,
            created_at: entry.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_reservation_status_is_reported() {
        let row = ReservationRow {
            id: Uuid::new_v4(),
            user_id: None,
            name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "555".to_owned(),
            reservation_date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("date"),
            reservation_time: NaiveTime::from_hms_opt(18, 0, 0).expect("time"),
            guests: 2,
            status: "seated".to_owned(),
            created_at: Utc::now(),
        };
        let err = Reservation::try_from(row).expect_err("unknown status");
        assert!(err.contains("seated"));
    }

    #[test]
    fn feedback_row_converts_rating() {
        let row = FeedbackRow {
            id: Uuid::new_v4(),
            name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
            rating: 5,
            message: "Wonderful espresso".to_owned(),
            created_at: Utc::now(),
        };
        let entry = FeedbackEntry::try_from(row).expect("valid row");
        assert_eq!(entry.rating.get(), 5);
    }
}
