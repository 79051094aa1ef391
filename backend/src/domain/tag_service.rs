//! Tag catalogue use-case.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{TagRepository, TagsQuery};
use super::{Error, Tag};

/// Implements [`TagsQuery`] over the tag repository.
#[derive(Clone)]
pub struct TagCatalogueService {
    tags: Arc<dyn TagRepository>,
}

impl TagCatalogueService {
    /// Build the service.
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl TagsQuery for TagCatalogueService {
    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        Ok(self.tags.list_tags().await?)
    }
}
