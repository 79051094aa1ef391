//! PostgreSQL-backed personal access token storage.
//!
//! Lookups stamp `last_used_at` on the matched row so operators can spot
//! stale tokens.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccessTokenRepository, AccessTokenRepositoryError};
use crate::domain::{AccessTokenRecord, NewAccessToken, TokenHash, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccessTokenRow, NewAccessTokenRow};
use super::pool::DbPool;
use super::schema::personal_access_tokens;

/// Diesel-backed implementation of [`AccessTokenRepository`].
#[derive(Clone)]
pub struct DieselAccessTokenRepository {
    pool: DbPool,
}

impl DieselAccessTokenRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_error(
    operation: &'static str,
) -> impl FnOnce(DieselError) -> AccessTokenRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            AccessTokenRepositoryError::query,
            AccessTokenRepositoryError::connection,
        )
    }
}

#[async_trait]
impl AccessTokenRepository for DieselAccessTokenRepository {
    async fn find_by_hash(
        &self,
        hash: &TokenHash,
    ) -> Result<Option<AccessTokenRecord>, AccessTokenRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccessTokenRepositoryError::connection))?;

        let row: Option<AccessTokenRow> = personal_access_tokens::table
            .filter(personal_access_tokens::token_hash.eq(hash.as_str()))
            .select(AccessTokenRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error("find access token"))?;
        let Some(row) = row else {
            return Ok(None);
        };

        diesel::update(personal_access_tokens::table.find(row.id))
            .set(personal_access_tokens::last_used_at.eq(Utc::now()))
            .execute(&mut conn)
            .await
            .map_err(query_error("touch access token"))?;

        Ok(Some(AccessTokenRecord {
            user_id: UserId::new(row.user_id),
            abilities: row.abilities,
        }))
    }

    async fn store(&self, token: &NewAccessToken) -> Result<(), AccessTokenRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccessTokenRepositoryError::connection))?;
        let row = NewAccessTokenRow {
            user_id: token.user_id.value(),
            name: &token.name,
            token_hash: token.hash.as_str(),
            abilities: token.abilities.clone(),
        };
        diesel::insert_into(personal_access_tokens::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(query_error("store access token"))?;
        Ok(())
    }
}
