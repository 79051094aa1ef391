//! Driven port for personal access tokens.

use async_trait::async_trait;

use crate::domain::{AccessTokenRecord, NewAccessToken, TokenHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by access token storage adapters.
    pub enum AccessTokenRepositoryError {
        /// Storage could not be reached.
        Connection => ServiceUnavailable, "token storage connection failed: {message}",
        /// A query or write failed.
        Query => InternalError, "token storage query failed: {message}",
    }
}

/// Storage port for hashed access tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// The token stored under `hash`, recording the lookup as a use.
    async fn find_by_hash(
        &self,
        hash: &TokenHash,
    ) -> Result<Option<AccessTokenRecord>, AccessTokenRepositoryError>;

    /// Persist a newly issued token.
    async fn store(&self, token: &NewAccessToken) -> Result<(), AccessTokenRepositoryError>;
}
