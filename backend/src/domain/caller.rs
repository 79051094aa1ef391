//! Authenticated callers and the abilities their tokens grant.

use super::{Error, UserId};

/// Ability granting every other ability.
pub const WILDCARD_ABILITY: &str = "*";

/// Capability scopes checked before privileged operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    /// Create office listings.
    OfficeCreate,
}

impl Ability {
    /// Scope name as stored on access tokens.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OfficeCreate => "office.create",
        }
    }
}

/// The user behind a request together with the abilities of the token they
/// presented.
///
/// # Examples
/// ```
/// use office_listings::domain::{Ability, Caller, UserId};
///
/// let caller = Caller::new(UserId::new(1), ["office.create"]);
/// assert!(caller.can(Ability::OfficeCreate));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    user_id: UserId,
    abilities: Vec<String>,
}

impl Caller {
    /// Build a caller from a user and the abilities granted to them.
    pub fn new<I, S>(user_id: UserId, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            abilities: abilities.into_iter().map(Into::into).collect(),
        }
    }

    /// The authenticated user.
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Granted ability names.
    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    /// Whether the caller holds `ability`, directly or through `*`.
    pub fn can(&self, ability: Ability) -> bool {
        self.abilities
            .iter()
            .any(|granted| granted == WILDCARD_ABILITY || granted == ability.as_str())
    }

    /// Fail with a forbidden error unless the caller holds `ability`.
    pub fn require(&self, ability: Ability) -> Result<(), Error> {
        if self.can(ability) {
            return Ok(());
        }
        Err(Error::forbidden(format!(
            "token lacks the {} ability",
            ability.as_str()
        )))
    }
}
