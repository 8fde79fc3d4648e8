//! HTTP mapping for domain errors.
//!
//! Every failure is rendered as the envelope
//! `{success: false, code, message, details?, trace_id?}` with the status
//! chosen from the [`ErrorCode`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::DuplicateEmail => StatusCode::CONFLICT,
        ErrorCode::UserNotFound | ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => {
            StatusCode::UNAUTHORIZED
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Failure envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    #[serde(flatten)]
    pub error: Error,
}

impl ErrorEnvelope {
    /// Wrap `error`, dropping structured details from internal failures.
    ///
    /// The message of an internal error is already generic, so only the
    /// details are removed.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        let error = if error.code() == ErrorCode::InternalError {
            let mut redacted = Error::internal(error.message());
            if let Some(id) = error.trace_id() {
                redacted = redacted.with_trace_id(id);
            }
            redacted
        } else {
            error.clone()
        };
        Self {
            success: false,
            error,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorEnvelope::from_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}
