//! Driving port resolving bearer tokens into callers.

use async_trait::async_trait;

use crate::domain::{Caller, Error};

/// Resolve the plaintext bearer token of a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallerAuthenticator: Send + Sync {
    /// The caller owning `token`, or an `unauthorized` error when no such
    /// token exists.
    async fn authenticate(&self, token: &str) -> Result<Caller, Error>;
}
