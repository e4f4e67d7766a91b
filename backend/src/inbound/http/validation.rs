//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies and query strings arrive as plain strings; these helpers
//! turn them into domain values or a `400` error naming the offending field.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{City, Email, Error, ProductType, Role};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidTimestamp,
    InvalidInteger,
    InvalidCity,
    InvalidProductType,
    InvalidRole,
    InvalidEmail,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidCity => "invalid_city",
            ErrorCode::InvalidProductType => "invalid_product_type",
            ErrorCode::InvalidRole => "invalid_role",
            ErrorCode::InvalidEmail => "invalid_email",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        invalid_value(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_optional_uuid(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    value.map(|raw| parse_uuid(raw, field)).transpose()
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            invalid_value(
                field,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
                ErrorCode::InvalidTimestamp,
                value,
            )
        })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

pub(crate) fn parse_optional_integer(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<i64>, Error> {
    value
        .map(|raw| {
            raw.trim().parse::<i64>().map_err(|_| {
                invalid_value(
                    field,
                    format!("{} must be an integer", field.as_str()),
                    ErrorCode::InvalidInteger,
                    raw,
                )
            })
        })
        .transpose()
}

pub(crate) fn parse_city(value: &str, field: FieldName) -> Result<City, Error> {
    value
        .parse::<City>()
        .map_err(|err| invalid_value(field, err.to_string(), ErrorCode::InvalidCity, value))
}

pub(crate) fn parse_product_type(value: &str, field: FieldName) -> Result<ProductType, Error> {
    value.parse::<ProductType>().map_err(|err| {
        invalid_value(field, err.to_string(), ErrorCode::InvalidProductType, value)
    })
}

pub(crate) fn parse_role(value: &str, field: FieldName) -> Result<Role, Error> {
    value
        .parse::<Role>()
        .map_err(|err| invalid_value(field, err.to_string(), ErrorCode::InvalidRole, value))
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<Email, Error> {
    Email::new(value)
        .map_err(|err| invalid_value(field, err.to_string(), ErrorCode::InvalidEmail, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as ApiErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error
            .details()
            .and_then(|details| details.get(key))
            .and_then(Value::as_str)
    }

    #[rstest]
    fn invalid_uuid_names_field_and_value() {
        let error = parse_uuid("nope", FieldName::new("pvzId")).expect_err("rejected");
        assert_eq!(error.code(), ApiErrorCode::InvalidRequest);
        assert_eq!(error.message(), "pvzId must be a valid UUID");
        assert_eq!(detail(&error, "field"), Some("pvzId"));
        assert_eq!(detail(&error, "value"), Some("nope"));
        assert_eq!(detail(&error, "code"), Some("invalid_uuid"));
    }

    #[rstest]
    fn absent_optional_values_parse_to_none() {
        let field = FieldName::new("startDate");
        assert_eq!(parse_optional_rfc3339_timestamp(None, field), Ok(None));
        assert_eq!(parse_optional_integer(None, field), Ok(None));
        assert_eq!(parse_optional_uuid(None, field), Ok(None));
    }

    #[rstest]
    fn timestamps_are_normalised_to_utc() {
        let parsed =
            parse_rfc3339_timestamp("2025-04-10T15:00:00+03:00", FieldName::new("startDate"))
                .expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2025-04-10T12:00:00+00:00");
    }

    #[rstest]
    #[case("Moscow", City::Moscow)]
    #[case("Казань", City::Kazan)]
    fn cities_accept_canonical_and_alias_names(#[case] raw: &str, #[case] expected: City) {
        assert_eq!(parse_city(raw, FieldName::new("city")), Ok(expected));
    }

    #[rstest]
    #[case::city(parse_city("Berlin", FieldName::new("city")).map(|_| ()), "invalid_city")]
    #[case::product(
        parse_product_type("furniture", FieldName::new("type")).map(|_| ()),
        "invalid_product_type"
    )]
    #[case::role(parse_role("admin", FieldName::new("role")).map(|_| ()), "invalid_role")]
    #[case::email(parse_email("clerk", FieldName::new("email")).map(|_| ()), "invalid_email")]
    #[case::integer(
        parse_optional_integer(Some("ten"), FieldName::new("limit")).map(|_| ()),
        "invalid_integer"
    )]
    fn unknown_values_are_invalid_requests(
        #[case] result: Result<(), Error>,
        #[case] expected_code: &str,
    ) {
        let error = result.expect_err("rejected");
        assert_eq!(error.code(), ApiErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "code"), Some(expected_code));
    }
}
