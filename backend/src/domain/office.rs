//! Office listings.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::{OfficeId, TagId, UserId};

/// Number of fractional digits kept for coordinates.
pub const COORDINATE_SCALE: u32 = 8;

/// Whether an office may appear in public listings.
///
/// Approval happens outside this service; new offices always start
/// [`ApprovalStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalStatus {
    /// Awaiting review.
    Pending,
    /// Cleared for listing.
    Approved,
}

impl ApprovalStatus {
    /// Stored representation.
    pub const fn code(self) -> i16 {
        match self {
            Self::Pending => 1,
            Self::Approved => 2,
        }
    }

    /// Decode a stored value.
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Pending),
            2 => Some(Self::Approved),
            _ => None,
        }
    }

    /// Wire label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

/// A latitude/longitude pair held to [`COORDINATE_SCALE`] decimal places.
///
/// # Examples
/// ```
/// use office_listings::domain::Coordinates;
/// use rust_decimal::Decimal;
///
/// let point = Coordinates::new(
///     "24.3613168287183".parse::<Decimal>().expect("decimal"),
///     "88.60688992824939".parse::<Decimal>().expect("decimal"),
/// );
/// assert_eq!(point.latitude().to_string(), "24.36131683");
/// assert_eq!(point.longitude().to_string(), "88.60688993");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    latitude: Decimal,
    longitude: Decimal,
}

impl Coordinates {
    /// Build a point, rounding both axes to [`COORDINATE_SCALE`] places.
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude: normalise(latitude),
            longitude: normalise(longitude),
        }
    }

    /// Build a point from floating-point degrees.
    ///
    /// Returns `None` for non-finite input.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Option<Self> {
        let latitude = Decimal::from_f64_retain(latitude)?;
        let longitude = Decimal::from_f64_retain(longitude)?;
        Some(Self::new(latitude, longitude))
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> Decimal {
        self.latitude
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> Decimal {
        self.longitude
    }

    /// `(latitude, longitude)` as floating-point degrees.
    pub fn degrees(&self) -> (f64, f64) {
        (
            self.latitude.to_f64().unwrap_or_default(),
            self.longitude.to_f64().unwrap_or_default(),
        )
    }
}

fn normalise(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(COORDINATE_SCALE);
    rounded.rescale(COORDINATE_SCALE);
    rounded
}

/// A stored office without its associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Office {
    /// Stable identifier, increasing with insertion order.
    pub id: OfficeId,
    /// Owning user.
    pub host_id: UserId,
    /// Listing headline.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Where the office is.
    pub location: Coordinates,
    /// Street address.
    pub address_line1: String,
    /// Listing gate.
    pub approval_status: ApprovalStatus,
    /// Hidden offices never appear in listings.
    pub hidden: bool,
    /// Daily price in minor currency units.
    pub price_per_day: i32,
    /// Percentage taken off monthly bookings.
    pub monthly_discount: i32,
}

/// A validated office ready to be persisted for its host.
///
/// There is no approval field: every new office is stored as
/// [`ApprovalStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffice {
    /// Owning user, always the authenticated caller.
    pub host_id: UserId,
    /// Listing headline.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Where the office is.
    pub location: Coordinates,
    /// Street address.
    pub address_line1: String,
    /// Hidden from listings.
    pub hidden: bool,
    /// Daily price in minor currency units.
    pub price_per_day: i32,
    /// Percentage taken off monthly bookings.
    pub monthly_discount: i32,
    /// Tags to link, without duplicates.
    pub tags: Vec<TagId>,
}

impl NewOffice {
    /// Status every new office is stored with.
    pub const fn approval_status(&self) -> ApprovalStatus {
        ApprovalStatus::Pending
    }
}

/// What storing a [`NewOffice`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficeCreation {
    /// The office and its tag links were committed under this id.
    Created(OfficeId),
    /// Nothing was committed: these tags were gone by the time the links
    /// were written.
    UnknownTags(Vec<TagId>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decimal(raw: &str) -> Decimal {
        raw.parse().expect("decimal literal")
    }

    #[rstest]
    #[case(ApprovalStatus::Pending, 1, "pending")]
    #[case(ApprovalStatus::Approved, 2, "approved")]
    fn approval_codes_are_stable(
        #[case] status: ApprovalStatus,
        #[case] code: i16,
        #[case] label: &str,
    ) {
        assert_eq!(status.code(), code);
        assert_eq!(ApprovalStatus::from_code(code), Some(status));
        assert_eq!(status.as_str(), label);
    }

    #[rstest]
    #[case("23.73977582064981", "23.73977582")]
    #[case("-0.5", "-0.50000000")]
    #[case("90", "90.00000000")]
    fn coordinates_keep_eight_places(#[case] raw: &str, #[case] expected: &str) {
        let point = Coordinates::new(decimal(raw), decimal(raw));
        assert_eq!(point.latitude().to_string(), expected);
        assert_eq!(point.longitude().to_string(), expected);
    }

    #[rstest]
    fn degrees_round_trip_through_floats() {
        let point = Coordinates::from_degrees(23.739_775_82, 90.382_699_77).expect("finite");
        assert_eq!(point.latitude().to_string(), "23.73977582");
        assert_eq!(point.longitude().to_string(), "90.38269977");
    }

    #[rstest]
    fn non_finite_degrees_are_rejected() {
        assert!(Coordinates::from_degrees(f64::NAN, 0.0).is_none());
    }
}
