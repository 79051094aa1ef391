//! Offices enriched with their associations.

use super::{Host, Image, Office, Tag};

/// An office plus its host, tags, images and active reservation count.
///
/// Listing items and the detail view share this shape. Offices without
/// tags or images carry empty vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeAggregate {
    /// The office itself.
    pub office: Office,
    /// Owning user.
    pub host: Host,
    /// Linked tags, in no particular order.
    pub tags: Vec<Tag>,
    /// Images owned by the office, in no particular order.
    pub images: Vec<Image>,
    /// Number of reservations on the office that are still active.
    pub active_reservations: u64,
}
