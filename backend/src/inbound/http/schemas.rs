//! OpenAPI stand-ins for the domain error payload.
//!
//! `crate::domain` has no utoipa derives; these mirrors are registered under
//! the domain type names instead.

use utoipa::ToSchema;

/// Mirror of [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or breaks an intake rule.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The principal's role may not perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// Storage is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Mirror of [`crate::domain::Error`].
///
/// `details.reason` carries the stable failure sentinel, for example
/// `ERR_PVZ_ALREADY_EXIST`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "fields are only read by the utoipa derive"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "pickup point already exists")]
    message: String,
    /// Matches the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[schema(example = json!({"reason": "ERR_PVZ_ALREADY_EXIST"}))]
    details: Option<serde_json::Value>,
}
