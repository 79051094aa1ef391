//! Images and their owners.
//!
//! One image table serves every kind of owner. Each row records which kind
//! of record owns it (`resource_type`) and that record's key
//! (`resource_id`); [`ImageOwner`] keeps the pair together so readers resolve
//! the owner through the discriminator instead of guessing from the key.

use std::fmt;
use std::str::FromStr;

use super::{ImageId, OfficeId};

/// Kind of record that owns an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageOwnerKind {
    /// An office listing.
    Office,
}

impl ImageOwnerKind {
    /// Discriminator stored in the `resource_type` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Office => "office",
        }
    }
}

impl fmt::Display for ImageOwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored discriminator names no known owner kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image owner kind: {0}")]
pub struct UnknownImageOwnerKind(pub String);

impl FromStr for ImageOwnerKind {
    type Err = UnknownImageOwnerKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "office" => Ok(Self::Office),
            other => Err(UnknownImageOwnerKind(other.to_owned())),
        }
    }
}

/// Tagged reference to the record owning an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageOwner {
    /// Owner discriminator.
    pub kind: ImageOwnerKind,
    /// Owner key, interpreted according to `kind`.
    pub id: i64,
}

impl ImageOwner {
    /// Owner reference for an office.
    pub const fn office(id: OfficeId) -> Self {
        Self {
            kind: ImageOwnerKind::Office,
            id: id.value(),
        }
    }

    /// The owning office, when the owner is one.
    pub const fn as_office(self) -> Option<OfficeId> {
        match self.kind {
            ImageOwnerKind::Office => Some(OfficeId::new(self.id)),
        }
    }
}

/// A stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Stable image identifier.
    pub id: ImageId,
    /// Storage path of the file.
    pub path: String,
    /// Record this image belongs to.
    pub owner: ImageOwner,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn office_owner_resolves_back_to_office() {
        let owner = ImageOwner::office(OfficeId::new(9));
        assert_eq!(owner.kind.as_str(), "office");
        assert_eq!(owner.as_office(), Some(OfficeId::new(9)));
    }

    #[rstest]
    #[case("office", Ok(ImageOwnerKind::Office))]
    #[case("user", Err(UnknownImageOwnerKind("user".to_owned())))]
    fn parses_discriminator(
        #[case] raw: &str,
        #[case] expected: Result<ImageOwnerKind, UnknownImageOwnerKind>,
    ) {
        assert_eq!(raw.parse::<ImageOwnerKind>(), expected);
    }
}
