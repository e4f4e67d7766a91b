use super::*;
use crate::domain::{AuthError, IntakeError};
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::json;

const TRACE: &str = "7f1c2e5a-0b8d-4d7e-9a51-3c6f0e2b9d14";

/// Render `error` and decode what a client would receive.
async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("error json");
    (status, header, body)
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
#[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_has_a_status(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(http_status(code), status);
}

#[rstest]
#[case(IntakeError::InvalidRegistrationDate.into(), StatusCode::BAD_REQUEST)]
#[case(IntakeError::PickupPointAlreadyExists.into(), StatusCode::BAD_REQUEST)]
#[case(IntakeError::ReceptionAlreadyOpen.into(), StatusCode::BAD_REQUEST)]
#[case(IntakeError::ReceptionNotOpen.into(), StatusCode::BAD_REQUEST)]
#[case(IntakeError::NoProductsToDelete.into(), StatusCode::BAD_REQUEST)]
#[case(IntakeError::storage_unavailable("refused").into(), StatusCode::SERVICE_UNAVAILABLE)]
#[case(IntakeError::storage("deadlock").into(), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(AuthError::WrongPassword.into(), StatusCode::UNAUTHORIZED)]
#[case(AuthError::UserNotFound.into(), StatusCode::UNAUTHORIZED)]
#[case(AuthError::ForbiddenRole.into(), StatusCode::FORBIDDEN)]
fn service_failures_map_to_statuses(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(error.status_code(), status);
}

#[actix_web::test]
async fn internal_error_body_is_generic_but_traceable() {
    let error = Error::internal("password authentication failed for user pvz")
        .with_trace_id(TRACE.to_owned())
        .with_details(json!({ "reason": "ERR_STORAGE" }));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE));
    assert_eq!(body.message(), REDACTED_MESSAGE);
    assert_eq!(body.trace_id(), Some(TRACE));
    assert_eq!(body.details(), Some(&json!({ "reason": "ERR_STORAGE" })));
}

#[actix_web::test]
async fn unavailable_storage_text_stays_server_side() {
    let leaked = "could not connect to db-primary.internal:5432 as pvz_admin";
    let error = Error::from(IntakeError::storage_unavailable(leaked)).with_trace_id(TRACE.to_owned());

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(header.as_deref(), Some(TRACE));
    assert_eq!(body.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(body.message(), UNAVAILABLE_MESSAGE);
    assert_eq!(
        body.details(),
        Some(&json!({ "reason": "ERR_STORAGE_UNAVAILABLE" }))
    );
    let raw = serde_json::to_string(&body).expect("serialise");
    assert!(!raw.contains("db-primary"));
}

#[actix_web::test]
async fn unavailable_account_storage_is_generic_too() {
    let error: Error = AuthError::storage_unavailable("pool timed out after 5s").into();

    let (_, _, body) = render(&error).await;

    assert_eq!(body.message(), UNAVAILABLE_MESSAGE);
    assert!(!body.message().contains("timed out"));
}

#[actix_web::test]
async fn client_error_body_keeps_details() {
    let error = Error::invalid_request("city is not supported")
        .with_trace_id(TRACE.to_owned())
        .with_details(json!({ "field": "city", "value": "Paris" }));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE));
    assert_eq!(body, error);
}

#[actix_web::test]
async fn trace_header_is_absent_without_trace_id() {
    let (_, header, body) = render(&Error::unauthorized("missing bearer token")).await;

    assert!(header.is_none());
    assert_eq!(body.trace_id(), None);
}

#[rstest]
fn client_errors_are_borrowed_unchanged() {
    let error = Error::forbidden("employee role required");
    assert!(matches!(client_view(&error), Cow::Borrowed(view) if *view == error));
}

#[rstest]
fn framework_errors_become_generic_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("payload too large").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}
