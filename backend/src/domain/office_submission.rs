//! Field validation for new offices.
//!
//! The HTTP adapter decodes the request body into an [`OfficeSubmission`]
//! without judging it: each field is either missing, of the wrong type, or a
//! value. [`validate_submission`] then checks every field and records each
//! failure instead of stopping at the first one. Tag existence needs storage
//! and is checked by the service on the returned [`CheckedSubmission`].

use rust_decimal::Decimal;

use super::{Coordinates, FieldErrors, NewOffice, TagId, UserId};

/// Smallest accepted daily price.
pub const MIN_PRICE_PER_DAY: i64 = 100;
/// Largest accepted monthly discount percentage.
pub const MAX_MONTHLY_DISCOUNT: i64 = 90;

/// One decoded request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput<T> {
    /// Absent or `null`.
    Missing,
    /// Present but of the wrong type.
    Invalid,
    /// Present and well typed.
    Value(T),
}

impl<T> Default for FieldInput<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> FieldInput<T> {
    /// Wrap an optional value, treating `None` as missing.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Self::Value)
    }
}

/// Raw office fields as submitted by a host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficeSubmission {
    /// Listing headline.
    pub title: FieldInput<String>,
    /// Free-form description.
    pub description: FieldInput<String>,
    /// Latitude in degrees.
    pub latitude: FieldInput<Decimal>,
    /// Longitude in degrees.
    pub longitude: FieldInput<Decimal>,
    /// Street address.
    pub address_line1: FieldInput<String>,
    /// Hide from listings; defaults to `false`.
    pub hidden: FieldInput<bool>,
    /// Daily price.
    pub price_per_day: FieldInput<i64>,
    /// Monthly discount percentage; defaults to `0`.
    pub monthly_discount: FieldInput<i64>,
    /// Tag ids; each element is checked on its own.
    pub tags: FieldInput<Vec<FieldInput<TagId>>>,
}

/// Outcome of field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedSubmission {
    /// The office to insert, present only when no field failed.
    pub office: Option<NewOffice>,
    /// Every well-typed tag reference with its position in the request.
    pub tag_refs: Vec<(usize, TagId)>,
    /// Failures found so far.
    pub errors: FieldErrors,
}

impl CheckedSubmission {
    /// Record that the tag at `index` does not exist.
    pub fn reject_unknown_tag(&mut self, index: usize) {
        self.errors
            .add(format!("tags.{index}"), format!("The selected tags.{index} is invalid."));
        self.office = None;
    }
}

/// Check every field of `submission` on behalf of `host_id`.
///
/// # Examples
/// ```
/// use office_listings::domain::{FieldInput, OfficeSubmission, UserId, validate_submission};
///
/// let checked = validate_submission(
///     UserId::new(1),
///     OfficeSubmission {
///         title: FieldInput::Value("Harbour loft".to_owned()),
///         ..OfficeSubmission::default()
///     },
/// );
/// assert!(checked.office.is_none());
/// assert!(checked.errors.messages("title").is_empty());
/// assert!(!checked.errors.messages("description").is_empty());
/// ```
pub fn validate_submission(host_id: UserId, submission: OfficeSubmission) -> CheckedSubmission {
    let mut errors = FieldErrors::default();

    let title = required_text(&mut errors, "title", submission.title);
    let description = required_text(&mut errors, "description", submission.description);
    let latitude = required_degrees(&mut errors, "latitude", submission.latitude, 90);
    let longitude = required_degrees(&mut errors, "longitude", submission.longitude, 180);
    let address_line1 = required_text(&mut errors, "address_line1", submission.address_line1);
    let hidden = optional_flag(&mut errors, "hidden", submission.hidden);
    let price_per_day = bounded_integer(
        &mut errors,
        "price_per_day",
        submission.price_per_day,
        Bounds::at_least(MIN_PRICE_PER_DAY),
    );
    let monthly_discount = match submission.monthly_discount {
        FieldInput::Missing => Some(0),
        input => bounded_integer(
            &mut errors,
            "monthly_discount",
            input,
            Bounds::between(0, MAX_MONTHLY_DISCOUNT),
        ),
    };
    let tag_refs = tag_references(&mut errors, submission.tags);

    let office = match (
        title,
        description,
        latitude,
        longitude,
        address_line1,
        hidden,
        price_per_day,
        monthly_discount,
    ) {
        (
            Some(title),
            Some(description),
            Some(latitude),
            Some(longitude),
            Some(address_line1),
            Some(hidden),
            Some(price_per_day),
            Some(monthly_discount),
        ) if errors.is_empty() => Some(NewOffice {
            host_id,
            title,
            description,
            location: Coordinates::new(latitude, longitude),
            address_line1,
            hidden,
            price_per_day,
            monthly_discount,
            tags: distinct_tags(&tag_refs),
        }),
        _ => None,
    };

    CheckedSubmission {
        office,
        tag_refs,
        errors,
    }
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn required_text(errors: &mut FieldErrors, field: &str, input: FieldInput<String>) -> Option<String> {
    match input {
        FieldInput::Value(text) if !text.trim().is_empty() => Some(text),
        FieldInput::Invalid => {
            errors.add(field, format!("The {} must be a string.", label(field)));
            None
        }
        FieldInput::Missing | FieldInput::Value(_) => {
            errors.add(field, format!("The {} field is required.", label(field)));
            None
        }
    }
}

fn required_degrees(
    errors: &mut FieldErrors,
    field: &str,
    input: FieldInput<Decimal>,
    limit: i64,
) -> Option<Decimal> {
    let bound = Decimal::from(limit);
    match input {
        FieldInput::Value(degrees) if degrees.abs() <= bound => Some(degrees),
        FieldInput::Value(_) => {
            errors.add(
                field,
                format!("The {} must be between -{limit} and {limit}.", label(field)),
            );
            None
        }
        FieldInput::Invalid => {
            errors.add(field, format!("The {} must be a number.", label(field)));
            None
        }
        FieldInput::Missing => {
            errors.add(field, format!("The {} field is required.", label(field)));
            None
        }
    }
}

fn optional_flag(errors: &mut FieldErrors, field: &str, input: FieldInput<bool>) -> Option<bool> {
    match input {
        FieldInput::Missing => Some(false),
        FieldInput::Value(flag) => Some(flag),
        FieldInput::Invalid => {
            errors.add(field, format!("The {} field must be true or false.", label(field)));
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: i64,
    max: i64,
}

impl Bounds {
    const fn at_least(min: i64) -> Self {
        Self {
            min,
            max: i32::MAX as i64,
        }
    }

    const fn between(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

fn bounded_integer(
    errors: &mut FieldErrors,
    field: &str,
    input: FieldInput<i64>,
    bounds: Bounds,
) -> Option<i32> {
    let value = match input {
        FieldInput::Value(value) => value,
        FieldInput::Invalid => {
            errors.add(field, format!("The {} must be an integer.", label(field)));
            return None;
        }
        FieldInput::Missing => {
            errors.add(field, format!("The {} field is required.", label(field)));
            return None;
        }
    };
    if value < bounds.min {
        errors.add(
            field,
            format!("The {} must be at least {}.", label(field), bounds.min),
        );
        return None;
    }
    if value > bounds.max {
        errors.add(
            field,
            format!("The {} must not be greater than {}.", label(field), bounds.max),
        );
        return None;
    }
    i32::try_from(value).ok()
}

fn tag_references(
    errors: &mut FieldErrors,
    input: FieldInput<Vec<FieldInput<TagId>>>,
) -> Vec<(usize, TagId)> {
    let items = match input {
        FieldInput::Missing => return Vec::new(),
        FieldInput::Invalid => {
            errors.add("tags", "The tags must be an array.");
            return Vec::new();
        }
        FieldInput::Value(items) => items,
    };
    let mut refs = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            FieldInput::Value(id) => refs.push((index, id)),
            FieldInput::Missing | FieldInput::Invalid => {
                errors.add(
                    format!("tags.{index}"),
                    format!("The tags.{index} must be an integer."),
                );
            }
        }
    }
    refs
}

fn distinct_tags(refs: &[(usize, TagId)]) -> Vec<TagId> {
    let mut tags: Vec<TagId> = Vec::with_capacity(refs.len());
    for (_, id) in refs {
        if !tags.contains(id) {
            tags.push(*id);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn decimal(raw: &str) -> Decimal {
        raw.parse().expect("decimal literal")
    }

    #[fixture]
    fn valid() -> OfficeSubmission {
        OfficeSubmission {
            title: FieldInput::Value("Harbour loft".to_owned()),
            description: FieldInput::Value("Quiet desks by the water".to_owned()),
            latitude: FieldInput::Value(decimal("23.73977582064981")),
            longitude: FieldInput::Value(decimal("90.38269976914796")),
            address_line1: FieldInput::Value("12 Quay Street".to_owned()),
            hidden: FieldInput::Missing,
            price_per_day: FieldInput::Value(1_500),
            monthly_discount: FieldInput::Missing,
            tags: FieldInput::Value(vec![
                FieldInput::Value(TagId::new(1)),
                FieldInput::Value(TagId::new(2)),
                FieldInput::Value(TagId::new(1)),
            ]),
        }
    }

    #[rstest]
    fn valid_submission_builds_office(valid: OfficeSubmission) {
        let checked = validate_submission(UserId::new(5), valid);

        assert!(checked.errors.is_empty());
        let office = checked.office.expect("office built");
        assert_eq!(office.host_id, UserId::new(5));
        assert!(!office.hidden);
        assert_eq!(office.monthly_discount, 0);
        assert_eq!(office.price_per_day, 1_500);
        assert_eq!(office.location.latitude().to_string(), "23.73977582");
        assert_eq!(office.tags, vec![TagId::new(1), TagId::new(2)]);
        assert_eq!(checked.tag_refs.len(), 3);
    }

    #[rstest]
    fn empty_submission_reports_every_required_field() {
        let checked = validate_submission(UserId::new(1), OfficeSubmission::default());

        assert!(checked.office.is_none());
        assert_eq!(
            checked.errors.fields().collect::<Vec<_>>(),
            [
                "address_line1",
                "description",
                "latitude",
                "longitude",
                "price_per_day",
                "title"
            ]
        );
        assert_eq!(
            checked.errors.messages("address_line1"),
            ["The address line1 field is required.".to_owned()]
        );
    }

    #[rstest]
    #[case(99, Some("The price per day must be at least 100."))]
    #[case(100, None)]
    #[case(3_000_000_000, Some("The price per day must not be greater than 2147483647."))]
    fn price_has_a_floor(
        mut valid: OfficeSubmission,
        #[case] price: i64,
        #[case] message: Option<&str>,
    ) {
        valid.price_per_day = FieldInput::Value(price);
        let checked = validate_submission(UserId::new(1), valid);
        assert_eq!(
            checked.errors.messages("price_per_day").first().map(String::as_str),
            message
        );
    }

    #[rstest]
    #[case(FieldInput::Value(-1), false)]
    #[case(FieldInput::Value(0), true)]
    #[case(FieldInput::Value(90), true)]
    #[case(FieldInput::Value(91), false)]
    #[case(FieldInput::Invalid, false)]
    fn discount_stays_within_range(
        mut valid: OfficeSubmission,
        #[case] discount: FieldInput<i64>,
        #[case] accepted: bool,
    ) {
        valid.monthly_discount = discount;
        let checked = validate_submission(UserId::new(1), valid);
        assert_eq!(checked.office.is_some(), accepted);
        assert_eq!(checked.errors.messages("monthly_discount").is_empty(), accepted);
    }

    #[rstest]
    fn blank_text_counts_as_missing(mut valid: OfficeSubmission) {
        valid.title = FieldInput::Value("   ".to_owned());
        valid.description = FieldInput::Invalid;
        let checked = validate_submission(UserId::new(1), valid);

        assert_eq!(
            checked.errors.messages("title"),
            ["The title field is required.".to_owned()]
        );
        assert_eq!(
            checked.errors.messages("description"),
            ["The description must be a string.".to_owned()]
        );
    }

    #[rstest]
    fn coordinates_must_be_on_the_globe(mut valid: OfficeSubmission) {
        valid.latitude = FieldInput::Value(decimal("90.5"));
        valid.longitude = FieldInput::Invalid;
        let checked = validate_submission(UserId::new(1), valid);

        assert_eq!(
            checked.errors.messages("latitude"),
            ["The latitude must be between -90 and 90.".to_owned()]
        );
        assert_eq!(
            checked.errors.messages("longitude"),
            ["The longitude must be a number.".to_owned()]
        );
    }

    #[rstest]
    fn malformed_tags_are_reported_by_position(mut valid: OfficeSubmission) {
        valid.tags = FieldInput::Value(vec![FieldInput::Value(TagId::new(1)), FieldInput::Invalid]);
        let checked = validate_submission(UserId::new(1), valid);

        assert!(checked.office.is_none());
        assert_eq!(
            checked.errors.messages("tags.1"),
            ["The tags.1 must be an integer.".to_owned()]
        );
        assert_eq!(checked.tag_refs, vec![(0, TagId::new(1))]);
    }

    #[rstest]
    fn unknown_tag_clears_the_office(valid: OfficeSubmission) {
        let mut checked = validate_submission(UserId::new(1), valid);
        checked.reject_unknown_tag(1);

        assert!(checked.office.is_none());
        assert_eq!(
            checked.errors.messages("tags.1"),
            ["The selected tags.1 is invalid.".to_owned()]
        );
    }
}
