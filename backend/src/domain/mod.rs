//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed intake entities (pickup points,
//! receptions, products), accounts and principals, the typed failures of
//! each use-case, and the services that enforce the reception lifecycle.
//! Transport and storage concerns stay behind the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - IntakeError / AuthError: use-case failures with stable reasons.
//! - ReceptionLifecycleService / PickupPointQueryService: intake services.
//! - AuthenticationService: token issuing, registration and login.

pub mod auth;
pub mod auth_error;
pub mod authentication_service;
pub mod error;
pub mod intake_error;
pub mod listing;
pub mod pickup_point;
pub mod ports;
pub mod product;
pub mod reception;
pub mod reception_lifecycle_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessToken, LoginCredentials, MIN_PASSWORD_LENGTH, Password, Principal, Registration,
    password_meets_policy,
};
pub use self::auth_error::AuthError;
pub use self::authentication_service::{AuthenticationService, DUMMY_LOGIN_EMAIL, TOKEN_TTL_HOURS};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::intake_error::IntakeError;
pub use self::listing::{
    DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, PageRequest, PickupPointDetail, ReceptionDetail,
    ReceptionWindow, assemble_details,
};
pub use self::pickup_point::{City, PickupPoint, UnknownCityError};
pub use self::product::{Product, ProductType, UnknownProductTypeError};
pub use self::reception::{Reception, ReceptionStatus, UnknownReceptionStatusError};
pub use self::reception_lifecycle_service::{PickupPointQueryService, ReceptionLifecycleService};
pub use self::trace_id::TraceId;
pub use self::user::{Email, EmailValidationError, Role, UnknownRoleError, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pvz_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
