//! Table reservation handlers.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ApiResult;
use crate::inbound::http::auth::current_session;
use crate::inbound::http::dto::{
    FormOrJson, ReservationCreatedResponse, ReservationListResponse, ReservationRequest,
    ReservationView,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Book a table. Signed-in callers own the reservation; others book
/// anonymously.
#[utoipa::path(
    post,
    path = "/api/v1/reservation",
    request_body(
        content = ReservationRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Reservation stored", body = ReservationCreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["reservations"],
    operation_id = "createReservation"
)]
#[post("/reservation")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: FormOrJson<ReservationRequest>,
) -> ApiResult<HttpResponse> {
    let owner = current_session(&state, &session).await?;
    let reservation = state
        .reservations
        .submit(payload.into_inner().into(), owner.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(ReservationCreatedResponse::from(&reservation)))
}

/// List the signed-in user's reservations, latest date first.
#[utoipa::path(
    get,
    path = "/api/v1/reservation",
    responses(
        (status = 200, description = "Reservations", body = ReservationListResponse),
        (status = 401, description = "No active session", body = ErrorEnvelope),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["reservations"],
    operation_id = "listReservations"
)]
#[get("/reservation")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let owner = current_session(&state, &session).await?;
    let reservations = state
        .reservations_query
        .list_for_user(owner.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(ReservationListResponse {
        success: true,
        reservations: reservations.into_iter().map(ReservationView::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::{Days, Local};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{api_app, memory_state, session_cookie};

    fn today() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn tomorrow() -> String {
        Local::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .expect("valid date")
            .format("%Y-%m-%d")
            .to_string()
    }

    fn booking(date: &str, guests: &str) -> Vec<(&'static str, String)> {
        vec![
            ("name", "Jane Doe".to_owned()),
            ("email", "jane@example.com".to_owned()),
            ("phone", "555-0100".to_owned()),
            ("date", date.to_owned()),
            ("time", "18:00".to_owned()),
            ("guests", guests.to_owned()),
        ]
    }

    #[rstest]
    #[case("1", StatusCode::OK)]
    #[case("20", StatusCode::OK)]
    #[case("0", StatusCode::BAD_REQUEST)]
    #[case("21", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn guest_bounds(#[case] guests: &str, #[case] expected: StatusCode) {
        let app = test::init_service(api_app(memory_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/reservation")
                .set_form(booking(&tomorrow(), guests))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn anonymous_booking_echoes_date_and_time() {
        let app = test::init_service(api_app(memory_state())).await;
        let date = tomorrow();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/reservation")
                .set_json(json!({
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "phone": "555-0100",
                    "date": date,
                    "time": "18:00",
                    "guests": 2,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(
            body["message"],
            json!(format!("Reservation successful! See you on {date} at 18:00"))
        );
        assert_eq!(body["date"], json!(date));
        assert_eq!(body["time"], json!("18:00"));
        assert!(body["reservation_id"].is_string());
    }

    #[actix_web::test]
    async fn listing_without_session_is_unauthorised() {
        let app = test::init_service(api_app(memory_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/reservation").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], json!("unauthorized"));
        assert_eq!(body["message"], json!("Please login to view reservations"));
    }

    #[actix_web::test]
    async fn signed_in_bookings_are_listed_for_their_owner() {
        let app = test::init_service(api_app(memory_state())).await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/register")
                .set_form([
                    ("full_name", "Jane Doe"),
                    ("email", "jane@example.com"),
                    ("password", "secret1"),
                ])
                .to_request(),
        )
        .await;
        let login = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_form([("email", "jane@example.com"), ("password", "secret1")])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&login).expect("session cookie");

        for date in [today(), tomorrow()] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/v1/reservation")
                    .cookie(cookie.clone())
                    .set_form(booking(&date, "2"))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        // An anonymous booking must not appear in Jane's list.
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/reservation")
                .set_form(booking(&today(), "3"))
                .to_request(),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/reservation")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let listed = body["reservations"].as_array().expect("reservation list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["date"], json!(tomorrow()));
        assert_eq!(listed[1]["date"], json!(today()));
        assert_eq!(listed[0]["status"], json!("pending"));
        assert_eq!(listed[0]["guests"], json!(2));
    }
}
