//! Office owners as seen by listings.

use super::UserId;

/// The public face of a user attached to an office aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Stable user identifier.
    pub id: UserId,
    /// Name shown next to the listing.
    pub name: String,
}

impl Host {
    /// Build a host summary.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
