//! PostgreSQL-backed tag repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TagRepository, TagRepositoryError};
use crate::domain::{Tag, TagId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::TagRow;
use super::pool::DbPool;
use super::schema::tags;

/// Diesel-backed implementation of [`TagRepository`].
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list_tags(&self) -> Result<Vec<Tag>, TagRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TagRepositoryError::connection))?;
        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .order_by(tags::id)
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    "list tags",
                    TagRepositoryError::query,
                    TagRepositoryError::connection,
                )
            })?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn existing_tag_ids(&self, ids: &[TagId]) -> Result<Vec<TagId>, TagRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TagRepositoryError::connection))?;
        let raw: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        let found: Vec<i64> = tags::table
            .filter(tags::id.eq_any(&raw))
            .select(tags::id)
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    "check tag ids",
                    TagRepositoryError::query,
                    TagRepositoryError::connection,
                )
            })?;
        Ok(found.into_iter().map(TagId::new).collect())
    }
}
