//! Tests for account and token handlers.

use super::*;
use crate::domain::{AuthError, Email, Role};
use crate::inbound::http::test_utils::TestPorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

fn test_app(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(ports.into_state())
        .service(dummy_login)
        .service(register)
        .service(login)
}

async fn post(ports: TestPorts, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn reason(body: &Value) -> Option<&str> {
    body.pointer("/details/reason").and_then(Value::as_str)
}

#[rstest]
#[case("employee", Role::Employee)]
#[case("moderator", Role::Moderator)]
#[actix_web::test]
async fn dummy_login_returns_token_for_role(#[case] raw: &str, #[case] role: Role) {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_dummy_login()
        .withf(move |requested| *requested == role)
        .times(1)
        .returning(|_| Ok(AccessToken::new("signed.jwt.token")));

    let (status, body) = post(ports, "/dummyLogin", json!({ "role": raw })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "token": "signed.jwt.token" }));
}

#[actix_web::test]
async fn dummy_login_rejects_unknown_role() {
    let mut ports = TestPorts::default();
    ports.accounts.expect_dummy_login().times(0);

    let (status, body) = post(ports, "/dummyLogin", json!({ "role": "admin" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some("invalid_role")
    );
}

#[actix_web::test]
async fn dummy_login_signing_failure_is_redacted() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_dummy_login()
        .returning(|_| Err(AuthError::token_encoding_failed("bad key")));

    let (status, body) = post(ports, "/dummyLogin", json!({ "role": "employee" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
}

#[actix_web::test]
async fn register_returns_created_user_without_hash() {
    let id = Uuid::new_v4();
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|registration| {
            registration.email.as_str() == "clerk@pvz.example"
                && registration.password.expose() == "Secr3t!pass"
                && registration.role == Role::Employee
        })
        .returning(move |registration| {
            Ok(User {
                id,
                email: registration.email,
                role: registration.role,
            })
        });

    let (status, body) = post(
        ports,
        "/register",
        json!({ "email": "clerk@pvz.example", "password": "Secr3t!pass", "role": "employee" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "id": id.to_string(), "email": "clerk@pvz.example", "role": "employee" })
    );
}

#[rstest]
#[case(AuthError::WeakPassword, "ERR_WRONG_PASSWORD_FORMAT")]
#[case(AuthError::UserAlreadyExists, "ERR_USER_ALREADY_EXIST")]
#[actix_web::test]
async fn register_rejections_are_bad_requests(#[case] error: AuthError, #[case] expected: &str) {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_register()
        .return_once(move |_| Err(error));

    let (status, body) = post(
        ports,
        "/register",
        json!({ "email": "clerk@pvz.example", "password": "weak", "role": "moderator" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reason(&body), Some(expected));
}

#[actix_web::test]
async fn register_validates_email_before_calling_service() {
    let mut ports = TestPorts::default();
    ports.accounts.expect_register().times(0);

    let (status, body) = post(
        ports,
        "/register",
        json!({ "email": "clerk", "password": "Secr3t!pass", "role": "employee" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("email")
    );
}

#[rstest]
#[case(AuthError::UserNotFound, "ERR_USER_NOT_FOUND")]
#[case(AuthError::WrongPassword, "ERR_WRONG_PASSWORD")]
#[actix_web::test]
async fn login_failures_are_unauthorised(#[case] error: AuthError, #[case] expected: &str) {
    let mut ports = TestPorts::default();
    ports.accounts.expect_login().return_once(move |_| Err(error));

    let (status, body) = post(
        ports,
        "/login",
        json!({ "email": "clerk@pvz.example", "password": "Secr3t!pass" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(reason(&body), Some(expected));
}

#[actix_web::test]
async fn login_returns_token() {
    let mut ports = TestPorts::default();
    ports
        .accounts
        .expect_login()
        .withf(|credentials| {
            credentials.email == Email::new("clerk@pvz.example").expect("valid email")
        })
        .returning(|_| Ok(AccessToken::new("signed.jwt.token")));

    let (status, body) = post(
        ports,
        "/login",
        json!({ "email": "clerk@pvz.example", "password": "Secr3t!pass" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "token": "signed.jwt.token" }));
}
