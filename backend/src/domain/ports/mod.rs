//! Domain ports.
//!
//! Driven ports (`*Repository`) are implemented by the outbound adapters in
//! [`crate::outbound`]. Driving ports (`*Query`, `*Command`,
//! [`CallerAuthenticator`]) are implemented by the domain services and
//! consumed by the HTTP adapter.

mod macros;

mod access_token_repository;
mod caller_authenticator;
mod office_repository;
mod offices_command;
mod offices_query;
mod tag_repository;
mod tags_query;

pub(crate) use macros::define_port_error;

pub use access_token_repository::{AccessTokenRepository, AccessTokenRepositoryError};
pub use caller_authenticator::CallerAuthenticator;
pub use office_repository::{OfficeRepository, OfficeRepositoryError};
pub use offices_command::OfficesCommand;
pub use offices_query::OfficesQuery;
pub use tag_repository::{TagRepository, TagRepositoryError};
pub use tags_query::TagsQuery;

#[cfg(test)]
pub use access_token_repository::MockAccessTokenRepository;
#[cfg(test)]
pub use caller_authenticator::MockCallerAuthenticator;
#[cfg(test)]
pub use office_repository::MockOfficeRepository;
#[cfg(test)]
pub use offices_command::MockOfficesCommand;
#[cfg(test)]
pub use offices_query::MockOfficesQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use tags_query::MockTagsQuery;
