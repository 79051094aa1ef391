//! Filters for the public office listing.
//!
//! Listings always apply the visibility predicate: approved, not hidden,
//! not soft-deleted. Each populated field of [`OfficeListingFilter`] adds
//! one more predicate, AND-ed with the rest; an empty field adds nothing.

use super::{Coordinates, UserId};

/// Offices per listing page.
pub const OFFICES_PER_PAGE: u32 = 20;

/// Optional narrowing of the office listing.
///
/// # Examples
/// ```
/// use office_listings::domain::{ListingOrder, OfficeListingFilter, UserId};
///
/// let filter = OfficeListingFilter::default().with_host(UserId::new(4));
/// assert_eq!(filter.host_id, Some(UserId::new(4)));
/// assert_eq!(filter.order(), ListingOrder::IdAscending);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfficeListingFilter {
    /// Only offices owned by this user.
    pub host_id: Option<UserId>,
    /// Only offices this user holds at least one reservation on.
    pub visitor_id: Option<UserId>,
    /// Rank offices by distance from this point.
    pub near: Option<Coordinates>,
}

impl OfficeListingFilter {
    /// Restrict to offices owned by `host_id`.
    #[must_use]
    pub const fn with_host(mut self, host_id: UserId) -> Self {
        self.host_id = Some(host_id);
        self
    }

    /// Restrict to offices reserved by `visitor_id`.
    #[must_use]
    pub const fn with_visitor(mut self, visitor_id: UserId) -> Self {
        self.visitor_id = Some(visitor_id);
        self
    }

    /// Rank by distance from `point`.
    #[must_use]
    pub const fn near(mut self, point: Coordinates) -> Self {
        self.near = Some(point);
        self
    }

    /// How matching offices are ordered.
    pub const fn order(&self) -> ListingOrder {
        match self.near {
            Some(point) => ListingOrder::NearestTo(point),
            None => ListingOrder::IdAscending,
        }
    }
}

/// Ordering applied to listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
    /// Ascending distance score from the point, office id breaking ties.
    NearestTo(Coordinates),
    /// Ascending office id, which follows insertion order.
    IdAscending,
}
