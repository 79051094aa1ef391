//! Driven port for tag lookups.

use async_trait::async_trait;

use crate::domain::{Tag, TagId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tag storage adapters.
    pub enum TagRepositoryError {
        /// Storage could not be reached.
        Connection => ServiceUnavailable, "tag storage connection failed: {message}",
        /// A query failed.
        Query => InternalError, "tag storage query failed: {message}",
    }
}

/// Read port for tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Every tag ordered by id.
    async fn list_tags(&self) -> Result<Vec<Tag>, TagRepositoryError>;

    /// The subset of `ids` naming stored tags.
    async fn existing_tag_ids(&self, ids: &[TagId]) -> Result<Vec<TagId>, TagRepositoryError>;
}
