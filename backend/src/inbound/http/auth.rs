//! Account and token handlers.
//!
//! ```text
//! POST /dummyLogin {"role":"employee"}
//! POST /register {"email":"clerk@pvz.example","password":"Secr3t!pass","role":"employee"}
//! POST /login {"email":"clerk@pvz.example","password":"Secr3t!pass"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccessToken, LoginCredentials, Password, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email, parse_role};

/// Request body for `POST /dummyLogin`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DummyLoginRequest {
    #[schema(example = "employee")]
    pub role: String,
}

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "clerk@pvz.example")]
    pub email: String,
    pub password: String,
    #[schema(example = "employee")]
    pub role: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "clerk@pvz.example")]
    pub email: String,
    pub password: String,
}

/// Signed bearer token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

impl From<AccessToken> for TokenResponse {
    fn from(value: AccessToken) -> Self {
        Self {
            token: value.into_inner(),
        }
    }
}

/// Registered user; the password hash is never returned.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email.as_str().to_owned(),
            role: value.role.as_str().to_owned(),
        }
    }
}

/// Issue a token for an arbitrary principal holding `role`.
#[utoipa::path(
    post,
    path = "/dummyLogin",
    request_body = DummyLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Unknown role", body = ErrorSchema),
        (status = 500, description = "Token signing failed", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "dummyLogin",
    security([])
)]
#[post("/dummyLogin")]
pub async fn dummy_login(
    state: web::Data<HttpState>,
    payload: web::Json<DummyLoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let role = parse_role(&payload.role, FieldName::new("role"))?;
    let token = state.accounts.dummy_login(role).await?;
    Ok(web::Json(token.into()))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserBody),
        (status = 400, description = "Invalid email, weak password or duplicate user", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        role,
    } = payload.into_inner();
    let registration = Registration {
        email: parse_email(&email, FieldName::new("email"))?,
        password: Password::new(password),
        role: parse_role(&role, FieldName::new("role"))?,
    };
    let user = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(UserBody::from(user)))
}

/// Exchange credentials for a token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 401, description = "Unknown user or wrong password", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials {
        email: parse_email(&email, FieldName::new("email"))?,
        password: Password::new(password),
    };
    let token = state.accounts.login(credentials).await?;
    Ok(web::Json(token.into()))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
