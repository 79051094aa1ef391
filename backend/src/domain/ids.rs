//! Integer identifiers for stored records.
//!
//! Every table uses a 64-bit auto-incrementing key. Wrapping each in its own
//! newtype keeps an office id from being passed where a user id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw key.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// The raw key.
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of an office listing.
    OfficeId
);
define_id!(
    /// Identifier of a user, either a host or a visitor.
    UserId
);
define_id!(
    /// Identifier of a tag.
    TagId
);
define_id!(
    /// Identifier of an image.
    ImageId
);
