//! End-to-end account, session, and reservation flows over the full route
//! layout with in-memory storage.

#[allow(dead_code, reason = "Shared harness serves several test crates")]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Local, TimeDelta};
use rstest::rstest;
use serde_json::{Value, json};

use siptalk::domain::UserId;
use siptalk::domain::ports::ReservationRepository;
use support::{
    Harness, JANE_EMAIL, JANE_NAME, JANE_PASSWORD, login_request, register_request,
    session_cookie,
};

#[actix_web::test]
async fn jane_books_a_table_under_her_account() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;

    let res = test::call_service(
        &app,
        register_request(JANE_NAME, JANE_EMAIL, JANE_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let registered: Value = test::read_body_json(res).await;
    let user_id: UserId =
        serde_json::from_value(registered["user_id"].clone()).expect("user id");

    let res = test::call_service(&app, login_request(JANE_EMAIL, JANE_PASSWORD).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie");
    let logged_in: Value = test::read_body_json(res).await;
    assert_eq!(logged_in["user"]["id"], registered["user_id"]);
    assert_eq!(logged_in["user"]["full_name"], JANE_NAME);
    assert_eq!(logged_in["user"]["email"], JANE_EMAIL);

    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/reservation")
            .cookie(cookie.clone())
            .set_form([
                ("name", JANE_NAME),
                ("email", JANE_EMAIL),
                ("phone", "555-0100"),
                ("date", today.as_str()),
                ("time", "18:00"),
                ("guests", "2"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["date"], today.as_str());
    assert_eq!(created["time"], "18:00");

    let stored = harness
        .reservations
        .list_for_user(&user_id)
        .await
        .expect("stored reservations");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.first().and_then(|r| r.user_id), Some(user_id));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/reservation")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listed: Value = test::read_body_json(res).await;
    assert_eq!(listed["reservations"][0]["guests"], 2);
    assert_eq!(listed["reservations"][0]["status"], "pending");
}

#[actix_web::test]
async fn registering_twice_conflicts() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;

    let first = test::call_service(
        &app,
        register_request(JANE_NAME, JANE_EMAIL, JANE_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = test::call_service(
        &app,
        register_request("Jane Again", JANE_EMAIL, "another1").to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "duplicate_email");

    // The original password still logs in.
    let res = test::call_service(&app, login_request(JANE_EMAIL, JANE_PASSWORD).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case(JANE_EMAIL, "wrong-password", "invalid_credentials")]
#[case("stranger@example.com", JANE_PASSWORD, "user_not_found")]
#[actix_web::test]
async fn bad_logins_are_told_apart(
    #[case] email: &str,
    #[case] password: &str,
    #[case] code: &str,
) {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;
    test::call_service(
        &app,
        register_request(JANE_NAME, JANE_EMAIL, JANE_PASSWORD).to_request(),
    )
    .await;

    let res = test::call_service(&app, login_request(email, password).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], code);
}

#[actix_web::test]
async fn listing_reservations_requires_a_session() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/reservation").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[case(0, StatusCode::BAD_REQUEST)]
#[case(1, StatusCode::OK)]
#[case(20, StatusCode::OK)]
#[case(21, StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn guest_counts_are_bounded(#[case] guests: i64, #[case] expected: StatusCode) {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/reservation")
            .set_json(json!({
                "name": JANE_NAME,
                "email": JANE_EMAIL,
                "phone": "555-0100",
                "date": today,
                "time": "18:00",
                "guests": guests,
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn yesterday_cannot_be_booked() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;
    let yesterday = (Local::now().date_naive() - TimeDelta::days(1))
        .format("%Y-%m-%d")
        .to_string();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/reservation")
            .set_form([
                ("name", JANE_NAME),
                ("email", JANE_EMAIL),
                ("phone", "555-0100"),
                ("date", yesterday.as_str()),
                ("time", "18:00"),
                ("guests", "2"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn logout_is_idempotent() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;
    test::call_service(
        &app,
        register_request(JANE_NAME, JANE_EMAIL, JANE_PASSWORD).to_request(),
    )
    .await;
    let login =
        test::call_service(&app, login_request(JANE_EMAIL, JANE_PASSWORD).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": true, "message": "Logged out successfully" }));
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/check_session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let status: Value = test::read_body_json(res).await;
    assert_eq!(status["loggedin"], false);
}

#[actix_web::test]
async fn sessions_go_stale_after_an_hour_until_refreshed() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;
    test::call_service(
        &app,
        register_request(JANE_NAME, JANE_EMAIL, JANE_PASSWORD).to_request(),
    )
    .await;
    let login =
        test::call_service(&app, login_request(JANE_EMAIL, JANE_PASSWORD).to_request()).await;
    let cookie = session_cookie(&login).expect("session cookie");

    let check = || {
        test::TestRequest::get()
            .uri("/api/v1/check_session")
            .cookie(cookie.clone())
            .to_request()
    };

    let fresh: Value = test::read_body_json(test::call_service(&app, check()).await).await;
    assert_eq!(fresh["loggedin"], true);
    assert_eq!(fresh["stale"], false);

    harness.clock.advance(TimeDelta::minutes(61));
    let stale: Value = test::read_body_json(test::call_service(&app, check()).await).await;
    assert_eq!(stale["loggedin"], true);
    assert_eq!(stale["stale"], true);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/session/refresh")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let refreshed: Value = test::read_body_json(test::call_service(&app, check()).await).await;
    assert_eq!(refreshed["stale"], false);
}
