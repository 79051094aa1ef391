//! Decoding of `POST /api/v1/offices` bodies.
//!
//! The body is read as untyped JSON and every field is classified as
//! missing, mistyped or present before the domain validates it.

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value, json};

use crate::domain::{Error, FieldInput, OfficeSubmission, TagId};

use super::validation::parse_decimal;

/// Parse a raw request body into an [`OfficeSubmission`].
///
/// Fails only when the body is not a JSON object.
pub(crate) fn decode_submission(body: &[u8]) -> Result<OfficeSubmission, Error> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request("request body must be a JSON object")
            .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
    })?;
    let Value::Object(fields) = value else {
        return Err(Error::invalid_request("request body must be a JSON object")
            .with_details(json!({ "code": "invalid_json" })));
    };
    Ok(submission_from_fields(&fields))
}

fn submission_from_fields(fields: &Map<String, Value>) -> OfficeSubmission {
    OfficeSubmission {
        title: text(fields.get("title")),
        description: text(fields.get("description")),
        latitude: decimal(fields.get("latitude")),
        longitude: decimal(fields.get("longitude")),
        address_line1: text(fields.get("address_line1")),
        hidden: flag(fields.get("hidden")),
        price_per_day: integer(fields.get("price_per_day")),
        monthly_discount: integer(fields.get("monthly_discount")),
        tags: tag_list(fields.get("tags")),
    }
}

fn text(value: Option<&Value>) -> FieldInput<String> {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::String(text)) => FieldInput::Value(text.clone()),
        Some(_) => FieldInput::Invalid,
    }
}

fn decimal(value: Option<&Value>) -> FieldInput<Decimal> {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::String(raw)) if raw.trim().is_empty() => FieldInput::Missing,
        Some(Value::String(raw)) => parse_decimal(raw).map_or(FieldInput::Invalid, FieldInput::Value),
        Some(Value::Number(number)) => {
            number_as_decimal(number).map_or(FieldInput::Invalid, FieldInput::Value)
        }
        Some(_) => FieldInput::Invalid,
    }
}

fn number_as_decimal(number: &Number) -> Option<Decimal> {
    parse_decimal(&number.to_string())
}

fn integer(value: Option<&Value>) -> FieldInput<i64> {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::String(raw)) if raw.trim().is_empty() => FieldInput::Missing,
        Some(other) => as_integer(other).map_or(FieldInput::Invalid, FieldInput::Value),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn flag(value: Option<&Value>) -> FieldInput<bool> {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::Bool(flag)) => FieldInput::Value(*flag),
        Some(other) => match as_integer(other) {
            Some(0) => FieldInput::Value(false),
            Some(1) => FieldInput::Value(true),
            _ => FieldInput::Invalid,
        },
    }
}

fn tag_list(value: Option<&Value>) -> FieldInput<Vec<FieldInput<TagId>>> {
    match value {
        None | Some(Value::Null) => FieldInput::Missing,
        Some(Value::Array(items)) => FieldInput::Value(
            items
                .iter()
                .map(|item| {
                    as_integer(item)
                        .map(TagId::new)
                        .map_or(FieldInput::Invalid, FieldInput::Value)
                })
                .collect(),
        ),
        Some(_) => FieldInput::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn decode(value: Value) -> OfficeSubmission {
        decode_submission(value.to_string().as_bytes()).expect("object body")
    }

    #[rstest]
    fn decodes_well_typed_body() {
        let submission = decode(json!({
            "title": "Loft",
            "description": "Bright",
            "latitude": 23.73977582064981,
            "longitude": "90.38269976914796",
            "address_line1": "1 Main Street",
            "hidden": true,
            "price_per_day": 10_000,
            "monthly_discount": "5",
            "tags": [1, "2"]
        }));

        assert_eq!(submission.title, FieldInput::Value("Loft".to_owned()));
        assert_eq!(
            submission.latitude,
            FieldInput::Value("23.73977582064981".parse().expect("decimal"))
        );
        assert_eq!(
            submission.longitude,
            FieldInput::Value("90.38269976914796".parse().expect("decimal"))
        );
        assert_eq!(submission.hidden, FieldInput::Value(true));
        assert_eq!(submission.price_per_day, FieldInput::Value(10_000));
        assert_eq!(submission.monthly_discount, FieldInput::Value(5));
        assert_eq!(
            submission.tags,
            FieldInput::Value(vec![
                FieldInput::Value(TagId::new(1)),
                FieldInput::Value(TagId::new(2)),
            ])
        );
    }

    #[rstest]
    fn classifies_missing_and_mistyped_fields() {
        let submission = decode(json!({
            "title": 7,
            "description": null,
            "latitude": "north",
            "hidden": "maybe",
            "price_per_day": 10.5,
            "tags": [1, "x", null]
        }));

        assert_eq!(submission.title, FieldInput::Invalid);
        assert_eq!(submission.description, FieldInput::Missing);
        assert_eq!(submission.latitude, FieldInput::Invalid);
        assert_eq!(submission.longitude, FieldInput::Missing);
        assert_eq!(submission.hidden, FieldInput::Invalid);
        assert_eq!(submission.price_per_day, FieldInput::Invalid);
        assert_eq!(submission.monthly_discount, FieldInput::Missing);
        assert_eq!(
            submission.tags,
            FieldInput::Value(vec![
                FieldInput::Value(TagId::new(1)),
                FieldInput::Invalid,
                FieldInput::Invalid,
            ])
        );
    }

    #[rstest]
    fn ignores_client_supplied_approval_status() {
        let submission = decode(json!({ "approval_status": 2 }));
        assert_eq!(submission, OfficeSubmission::default());
    }

    #[rstest]
    #[case(b"[1, 2]".as_slice())]
    #[case(b"{not json".as_slice())]
    fn rejects_non_object_bodies(#[case] body: &[u8]) {
        let err = decode_submission(body).expect_err("not an object");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
