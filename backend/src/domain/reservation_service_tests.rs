//! Tests for the reservation workflow service.

use std::sync::Arc;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::MockReservationRepository;
use crate::domain::{
    EmailAddress, ErrorCode, FullName, ReservationStatus, UserId,
};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    })
}

fn today() -> NaiveDate {
    fixture_clock().local().date_naive()
}

fn form(date: NaiveDate, guests: Option<i64>) -> ReservationForm {
    ReservationForm {
        name: Some("Jane Doe".to_owned()),
        email: Some("jane@example.com".to_owned()),
        phone: Some("555-0100".to_owned()),
        date: Some(date.format("%Y-%m-%d").to_string()),
        time: Some("18:00".to_owned()),
        guests,
    }
}

fn session() -> Session {
    Session {
        user_id: UserId::random(),
        full_name: FullName::new("Jane Doe").expect("name"),
        email: EmailAddress::new("jane@example.com").expect("email"),
        established_at: Utc::now(),
    }
}

fn service(repo: MockReservationRepository) -> ReservationService<MockReservationRepository> {
    ReservationService::new(Arc::new(repo), fixture_clock())
}

#[tokio::test]
async fn submit_with_session_records_owner() {
    let session = session();
    let owner = session.user_id;
    let mut repo = MockReservationRepository::new();
    repo.expect_save()
        .withf(move |reservation: &Reservation| reservation.user_id == Some(owner))
        .times(1)
        .return_once(|_| Ok(()));

    let reservation = service(repo)
        .submit(form(today(), Some(2)), Some(&session))
        .await
        .expect("reservation stored");

    assert_eq!(reservation.user_id, Some(owner));
    assert_eq!(reservation.guests, 2);
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.date, today());
}

#[tokio::test]
async fn submit_without_session_is_anonymous() {
    let mut repo = MockReservationRepository::new();
    repo.expect_save()
        .withf(|reservation: &Reservation| reservation.user_id.is_none())
        .times(1)
        .return_once(|_| Ok(()));

    let reservation = service(repo)
        .submit(form(today(), None), None)
        .await
        .expect("reservation stored");
    assert_eq!(reservation.guests, 1);
}

#[rstest]
#[case(Some(0))]
#[case(Some(21))]
#[tokio::test]
async fn invalid_guest_counts_never_reach_storage(#[case] guests: Option<i64>) {
    let mut repo = MockReservationRepository::new();
    repo.expect_save().times(0);

    let err = service(repo)
        .submit(form(today(), guests), None)
        .await
        .expect_err("out of range");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Number of guests must be between 1 and 20");
}

#[tokio::test]
async fn yesterday_is_rejected() {
    let mut repo = MockReservationRepository::new();
    repo.expect_save().times(0);
    let yesterday = today()
        .checked_sub_days(Days::new(1))
        .expect("valid date");

    let err = service(repo)
        .submit(form(yesterday, Some(2)), None)
        .await
        .expect_err("past date");
    assert_eq!(err.message(), "Cannot book reservation in the past");
}

#[tokio::test]
async fn storage_failure_returns_generic_message() {
    let mut repo = MockReservationRepository::new();
    repo.expect_save()
        .times(1)
        .return_once(|_| Err(ReservationRepositoryError::query("constraint violated")));

    let err = service(repo)
        .submit(form(today(), Some(2)), None)
        .await
        .expect_err("write failed");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Failed to create reservation. Please try again.");
}

#[tokio::test]
async fn listing_requires_a_session() {
    let mut repo = MockReservationRepository::new();
    repo.expect_list_for_user().times(0);

    let err = service(repo)
        .list_for_user(None)
        .await
        .expect_err("anonymous");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), LOGIN_REQUIRED_MESSAGE);
}

#[tokio::test]
async fn listing_queries_by_session_user() {
    let session = session();
    let owner = session.user_id;
    let mut repo = MockReservationRepository::new();
    repo.expect_list_for_user()
        .withf(move |user_id: &UserId| *user_id == owner)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let reservations = service(repo)
        .list_for_user(Some(&session))
        .await
        .expect("listing");
    assert!(reservations.is_empty());
}
