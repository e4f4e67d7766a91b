//! Actix rendering of the domain [`Error`] payload.
//!
//! Client errors go out as they are. Internal and unavailable errors are
//! logged in full and replaced by a generic body, so storage messages never
//! reach callers.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

/// HTTP status carried by each error code.
pub(crate) const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Generic message replacing server-side failure text.
const fn generic_message(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::InternalError => Some(REDACTED_MESSAGE),
        ErrorCode::ServiceUnavailable => Some(UNAVAILABLE_MESSAGE),
        _ => None,
    }
}

/// Body sent to the client for `error`.
///
/// Server-side failures keep their code, trace id and `details.reason`;
/// the message and any other detail stay in the logs.
fn client_view(error: &Error) -> Cow<'_, Error> {
    let Some(message) = generic_message(error.code()) else {
        return Cow::Borrowed(error);
    };

    error!(
        code = ?error.code(),
        message = error.message(),
        details = ?error.details(),
        trace_id = error.trace_id().unwrap_or_default(),
        "responding with redacted server error"
    );
    let mut generic = Error::new(error.code(), message);
    if let Some(id) = error.trace_id() {
        generic = generic.with_trace_id(id.to_owned());
    }
    if let Some(reason) = error.details().and_then(|details| details.get("reason")) {
        generic = generic.with_details(json!({ "reason": reason }));
    }
    Cow::Owned(generic)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let body = client_view(self);
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = body.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(body)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced from handler");
        Error::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
