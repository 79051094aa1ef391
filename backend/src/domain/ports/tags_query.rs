//! Driving port for the tag catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Tag};

/// Use-case port behind `GET /tags`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagsQuery: Send + Sync {
    /// Every tag ordered by id.
    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;
}
