//! Labels attached to offices.

use super::TagId;

/// Tags every fresh store starts with, in id order.
pub const DEFAULT_TAG_NAMES: [&str; 3] = ["has_ac", "has_private_bathroom", "has_coffee_machine"];

/// A named label. Offices and tags are linked many-to-many; link order
/// carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Stable tag identifier.
    pub id: TagId,
    /// Display label, for example `"has_ac"`.
    pub name: String,
}

impl Tag {
    /// Build a tag.
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
