//! Contact and feedback form handlers.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ApiResult;
use crate::inbound::http::dto::{
    ContactRequest, ContactResponse, FeedbackCreatedResponse, FeedbackListResponse,
    FeedbackRequest, FeedbackView, FormOrJson,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

const CONTACT_SENT_MESSAGE: &str = "Your message has been sent successfully!";
const FEEDBACK_THANKS_MESSAGE: &str = "Thank you for your feedback!";
const FEEDBACK_LISTED_MESSAGE: &str = "Feedback retrieved successfully";

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body(
        content = ContactRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["forms"],
    operation_id = "submitContact",
    security([])
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: FormOrJson<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let message = state.contact.submit(payload.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: CONTACT_SENT_MESSAGE.to_owned(),
        contact_id: message.id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    request_body(
        content = FeedbackRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackCreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["forms"],
    operation_id = "submitFeedback",
    security([])
)]
#[post("/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    payload: FormOrJson<FeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let entry = state.feedback.submit(payload.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(FeedbackCreatedResponse {
        success: true,
        message: FEEDBACK_THANKS_MESSAGE.to_owned(),
        feedback_id: entry.id,
    }))
}

/// The 50 newest feedback entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/feedback",
    responses(
        (status = 200, description = "Recent feedback", body = FeedbackListResponse),
        (status = 503, description = "Storage unavailable", body = ErrorEnvelope)
    ),
    tags = ["forms"],
    operation_id = "listFeedback",
    security([])
)]
#[get("/feedback")]
pub async fn list_feedback(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.feedback_query.list_recent().await?;
    Ok(HttpResponse::Ok().json(FeedbackListResponse {
        success: true,
        message: FEEDBACK_LISTED_MESSAGE.to_owned(),
        feedback: entries.into_iter().map(FeedbackView::from).collect(),
    }))
}
