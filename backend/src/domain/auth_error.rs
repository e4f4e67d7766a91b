//! Failures raised while issuing and resolving principals.

use serde_json::json;

use super::Error;
use super::ports::{define_port_error, define_service_error};

define_service_error! {
    /// Authentication, authorisation and account failures.
    pub enum AuthError {
        /// Signing a token failed.
        TokenEncodingFailed { message: String } => "failed to encode token: {message}",
            reason = "ERR_FAILED_TO_ENCODE_JWT",
        /// The password does not satisfy the registration policy.
        WeakPassword =>
            "password must be at least 8 characters and contain upper, lower, digit and symbol characters",
            reason = "ERR_WRONG_PASSWORD_FORMAT",
        /// The e-mail address is malformed.
        InvalidEmail => "email address is malformed",
            reason = "ERR_WRONG_EMAIL_FORMAT",
        /// The e-mail address is already registered.
        UserAlreadyExists => "user already exists",
            reason = "ERR_USER_ALREADY_EXIST",
        /// No user is registered under the e-mail address.
        UserNotFound => "user not found",
            reason = "ERR_USER_NOT_FOUND",
        /// The password does not match the stored hash.
        WrongPassword => "wrong password",
            reason = "ERR_WRONG_PASSWORD",
        /// The bearer token failed signature, expiry or format checks.
        InvalidToken => "invalid auth token",
            reason = "ERR_INVALID_AUTH_TOKEN",
        /// The token decoded but its claims have an unexpected shape.
        InvalidClaims => "cannot parse token claims",
            reason = "ERR_CANNOT_PARSE_CLAIMS",
        /// No bearer token accompanied the request.
        Unauthenticated => "authentication required",
            reason = "ERR_UNAUTHENTICATED",
        /// The principal's role may not perform the operation.
        ForbiddenRole => "access is forbidden for the current role",
            reason = "ACCESS_IS_FORBIDDEN_FOR_CURRENT_ROLE",
        /// Hashing or verifying a password failed unexpectedly.
        PasswordHashing { message: String } => "password hashing failed: {message}",
            reason = "ERR_FAILED_TO_HASH_PASSWORD",
        /// Storage could not be reached.
        StorageUnavailable { message: String } => "account storage unavailable: {message}",
            reason = "ERR_STORAGE_UNAVAILABLE",
        /// Storage failed while executing a query.
        Storage { message: String } => "account storage failed: {message}",
            reason = "ERR_STORAGE",
    }
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        let reason = value.reason();
        let error = match &value {
            AuthError::WeakPassword | AuthError::InvalidEmail | AuthError::UserAlreadyExists => {
                Error::invalid_request(value.to_string())
            }
            AuthError::UserNotFound
            | AuthError::WrongPassword
            | AuthError::InvalidToken
            | AuthError::InvalidClaims
            | AuthError::Unauthenticated => Error::unauthorized(value.to_string()),
            AuthError::ForbiddenRole => Error::forbidden(value.to_string()),
            AuthError::StorageUnavailable { .. } => Error::service_unavailable(value.to_string()),
            AuthError::TokenEncodingFailed { .. }
            | AuthError::PasswordHashing { .. }
            | AuthError::Storage { .. } => Error::internal(value.to_string()),
        };
        error.with_details(json!({ "reason": reason }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(AuthError::weak_password(), ErrorCode::InvalidRequest)]
    #[case(AuthError::invalid_email(), ErrorCode::InvalidRequest)]
    #[case(AuthError::user_already_exists(), ErrorCode::InvalidRequest)]
    #[case(AuthError::user_not_found(), ErrorCode::Unauthorized)]
    #[case(AuthError::wrong_password(), ErrorCode::Unauthorized)]
    #[case(AuthError::invalid_token(), ErrorCode::Unauthorized)]
    #[case(AuthError::invalid_claims(), ErrorCode::Unauthorized)]
    #[case(AuthError::unauthenticated(), ErrorCode::Unauthorized)]
    #[case(AuthError::forbidden_role(), ErrorCode::Forbidden)]
    #[case(AuthError::token_encoding_failed("key"), ErrorCode::InternalError)]
    #[case(AuthError::password_hashing("salt"), ErrorCode::InternalError)]
    #[case(AuthError::storage_unavailable("refused"), ErrorCode::ServiceUnavailable)]
    #[case(AuthError::storage("syntax"), ErrorCode::InternalError)]
    fn maps_to_error_codes(#[case] error: AuthError, #[case] expected: ErrorCode) {
        let reason = error.reason();
        let mapped = Error::from(error);
        assert_eq!(mapped.code(), expected);
        assert_eq!(
            mapped.details().and_then(|d| d.get("reason")).and_then(|r| r.as_str()),
            Some(reason)
        );
    }
}
