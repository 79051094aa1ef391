//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query parameters arrive as raw strings so a malformed value can be
//! reported with the field and value that caused it instead of a generic
//! deserialisation failure.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidInteger,
    InvalidNumber,
    InvalidPage,
    MissingPair,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::MissingPair => "missing_pair",
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

    pub(crate) fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse an optional integer identifier such as `host_id`.
pub(crate) fn parse_optional_id<T>(value: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                field_error(
                    field,
                    format!("{} must be an integer", field.as_str()),
                    ErrorCode::InvalidInteger,
                    raw,
                )
            })
        })
        .transpose()
}

/// Parse an optional decimal such as `latitude`.
pub(crate) fn parse_optional_decimal(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Decimal>, Error> {
    value
        .map(|raw| {
            parse_decimal(raw).ok_or_else(|| {
                field_error(
                    field,
                    format!("{} must be a number", field.as_str()),
                    ErrorCode::InvalidNumber,
                    raw,
                )
            })
        })
        .transpose()
}

/// Accepts plain and scientific notation.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

/// Parse the 1-based `page` parameter, defaulting to 1.
pub(crate) fn parse_page(value: Option<&str>, field: FieldName) -> Result<u32, Error> {
    let Some(raw) = value else {
        return Ok(1);
    };
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(field_error(
            field,
            format!("{} must be a positive integer", field.as_str()),
            ErrorCode::InvalidPage,
            raw,
        )),
    }
}

/// Error for a parameter that is only meaningful together with `partner`.
pub(crate) fn missing_pair_error(present: FieldName, partner: FieldName, value: &str) -> Error {
    field_error(
        present,
        format!(
            "{} requires {} to be supplied as well",
            present.as_str(),
            partner.as_str()
        ),
        ErrorCode::MissingPair,
        value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    const HOST: FieldName = FieldName::new("host_id");
    const LATITUDE: FieldName = FieldName::new("latitude");
    const PAGE: FieldName = FieldName::new("page");

    #[rstest]
    fn absent_id_is_none() {
        assert_eq!(parse_optional_id::<UserId>(None, HOST).expect("absent"), None);
    }

    #[rstest]
    fn non_integer_id_reports_field_and_value() {
        let err = parse_optional_id::<UserId>(Some("abc"), HOST).expect_err("not an id");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "host_id", "value": "abc", "code": "invalid_integer" }))
        );
    }

    #[rstest]
    #[case("23.73977582064981", "23.73977582064981")]
    #[case(" -0.5 ", "-0.5")]
    #[case("1e1", "10")]
    fn decimals_parse(#[case] raw: &str, #[case] expected: &str) {
        let value = parse_optional_decimal(Some(raw), LATITUDE)
            .expect("numeric")
            .expect("present");
        assert_eq!(value, expected.parse::<Decimal>().expect("decimal"));
    }

    #[rstest]
    fn non_numeric_coordinate_is_rejected() {
        let err = parse_optional_decimal(Some("north"), LATITUDE).expect_err("not numeric");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "latitude", "value": "north", "code": "invalid_number" }))
        );
    }

    #[rstest]
    #[case(None, Ok(1))]
    #[case(Some("3"), Ok(3))]
    #[case(Some("0"), Err(()))]
    #[case(Some("-1"), Err(()))]
    #[case(Some("two"), Err(()))]
    fn pages_are_one_based(#[case] raw: Option<&str>, #[case] expected: Result<u32, ()>) {
        assert_eq!(parse_page(raw, PAGE).map_err(|_| ()), expected);
    }
}
