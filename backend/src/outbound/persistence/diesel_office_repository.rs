//! PostgreSQL-backed office repository.
//!
//! Listing runs two statements over the same filtered query: one counting
//! every match and one selecting the ids on the requested page. Aggregates are
//! then loaded for those ids inside a single read transaction so the office,
//! its host, tags, images and reservation counts come from one snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::{count_star, sql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::Double;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{OfficeRepository, OfficeRepositoryError};
use crate::domain::{
    ApprovalStatus, Host, Image, ImageOwnerKind, ListingOrder, NewOffice, Office, OfficeAggregate,
    OfficeCreation, OfficeId, OfficeListingFilter, ReservationStatus, SQL_DISTANCE_SCORE, Tag,
    TagId,
};

use super::diesel_error_mapping::{collect_rows, map_diesel_error, map_pool_error};
use super::models::{ImageRow, NewOfficeRow, OfficeRow, OfficeTagRow, TagRow, UserRow};
use super::pool::DbPool;
use super::schema::{images, offices, offices_tags, reservations, tags, users};

/// Diesel-backed implementation of [`OfficeRepository`].
#[derive(Clone)]
pub struct DieselOfficeRepository {
    pool: DbPool,
}

impl DieselOfficeRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_error(operation: &'static str) -> impl FnOnce(DieselError) -> OfficeRepositoryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            OfficeRepositoryError::query,
            OfficeRepositoryError::connection,
        )
    }
}

/// Why an office insert transaction was rolled back.
enum CreateFailure {
    Diesel(DieselError),
    UnknownTags(Vec<TagId>),
}

impl From<DieselError> for CreateFailure {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

/// Approved, visible, non-deleted offices narrowed by `filter`.
fn listed_offices(filter: &OfficeListingFilter) -> offices::BoxedQuery<'static, Pg> {
    let mut query = offices::table
        .filter(offices::approval_status.eq(ApprovalStatus::Approved.code()))
        .filter(offices::hidden.eq(false))
        .filter(offices::deleted_at.is_null())
        .into_boxed();

    if let Some(host_id) = filter.host_id {
        query = query.filter(offices::user_id.eq(host_id.value()));
    }
    if let Some(visitor_id) = filter.visitor_id {
        query = query.filter(
            offices::id.eq_any(
                reservations::table
                    .select(reservations::office_id)
                    .filter(reservations::user_id.eq(visitor_id.value())),
            ),
        );
    }
    query
}

fn ordered(
    query: offices::BoxedQuery<'static, Pg>,
    order: ListingOrder,
) -> offices::BoxedQuery<'static, Pg> {
    match order {
        ListingOrder::NearestTo(point) => {
            let (latitude, longitude) = point.degrees();
            let [head, middle, tail] = SQL_DISTANCE_SCORE;
            let score = sql::<Double>(head)
                .bind::<Double, _>(latitude)
                .sql(middle)
                .bind::<Double, _>(longitude)
                .sql(tail);
            query.order((score.asc(), offices::id.asc()))
        }
        ListingOrder::IdAscending => query.order(offices::id.asc()),
    }
}

struct AggregateRows {
    offices: Vec<OfficeRow>,
    hosts: Vec<UserRow>,
    tags: Vec<(i64, TagRow)>,
    images: Vec<ImageRow>,
    active_reservations: Vec<(i64, i64)>,
}

async fn load_aggregate_rows(
    conn: &mut AsyncPgConnection,
    office_ids: Vec<i64>,
) -> Result<AggregateRows, OfficeRepositoryError> {
    conn.transaction(|conn| {
        async move {
            let office_rows: Vec<OfficeRow> = offices::table
                .filter(offices::id.eq_any(&office_ids))
                .filter(offices::deleted_at.is_null())
                .select(OfficeRow::as_select())
                .load(conn)
                .await?;
            let host_ids: Vec<i64> = office_rows.iter().map(|row| row.user_id).collect();
            let hosts: Vec<UserRow> = users::table
                .filter(users::id.eq_any(&host_ids))
                .select(UserRow::as_select())
                .load(conn)
                .await?;
            let tag_rows: Vec<(i64, TagRow)> = offices_tags::table
                .inner_join(tags::table)
                .filter(offices_tags::office_id.eq_any(&office_ids))
                .select((offices_tags::office_id, TagRow::as_select()))
                .order_by(tags::id)
                .load(conn)
                .await?;
            let image_rows: Vec<ImageRow> = images::table
                .filter(images::resource_type.eq(ImageOwnerKind::Office.as_str()))
                .filter(images::resource_id.eq_any(&office_ids))
                .select(ImageRow::as_select())
                .order_by(images::id)
                .load(conn)
                .await?;
            let active_reservations: Vec<(i64, i64)> = reservations::table
                .filter(reservations::office_id.eq_any(&office_ids))
                .filter(reservations::status.eq(ReservationStatus::Active.code()))
                .group_by(reservations::office_id)
                .select((reservations::office_id, count_star()))
                .load(conn)
                .await?;
            Ok(AggregateRows {
                offices: office_rows,
                hosts,
                tags: tag_rows,
                images: image_rows,
                active_reservations,
            })
        }
        .scope_boxed()
    })
    .await
    .map_err(query_error("load office aggregates"))
}

/// Stitch loaded rows into aggregates following the order of `ids`.
fn assemble(
    ids: &[OfficeId],
    rows: AggregateRows,
) -> Result<Vec<OfficeAggregate>, OfficeRepositoryError> {
    let map_err = OfficeRepositoryError::query;
    let offices = collect_rows(rows.offices.into_iter().map(Office::try_from), map_err)?;
    let mut offices: HashMap<OfficeId, Office> =
        offices.into_iter().map(|office| (office.id, office)).collect();
    let hosts: HashMap<i64, Host> = rows
        .hosts
        .into_iter()
        .map(|row| (row.id, Host::from(row)))
        .collect();

    let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (office_id, row) in rows.tags {
        tags.entry(office_id).or_default().push(Tag::from(row));
    }

    let images = collect_rows(rows.images.into_iter().map(Image::try_from), map_err)?;
    let mut images_by_office: HashMap<i64, Vec<Image>> = HashMap::new();
    for image in images {
        images_by_office.entry(image.owner.id).or_default().push(image);
    }

    let counts: HashMap<i64, u64> = rows
        .active_reservations
        .into_iter()
        .map(|(office_id, count)| (office_id, u64::try_from(count).unwrap_or_default()))
        .collect();

    let mut aggregates = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(office) = offices.remove(id) else {
            continue;
        };
        let host = hosts.get(&office.host_id.value()).cloned().ok_or_else(|| {
            OfficeRepositoryError::query(format!(
                "office {} references missing host {}",
                office.id, office.host_id
            ))
        })?;
        let key = office.id.value();
        aggregates.push(OfficeAggregate {
            host,
            tags: tags.remove(&key).unwrap_or_default(),
            images: images_by_office.remove(&key).unwrap_or_default(),
            active_reservations: counts.get(&key).copied().unwrap_or_default(),
            office,
        });
    }
    Ok(aggregates)
}

#[async_trait]
impl OfficeRepository for DieselOfficeRepository {
    async fn list_office_ids(
        &self,
        filter: &OfficeListingFilter,
        page: PageRequest,
    ) -> Result<Page<OfficeId>, OfficeRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OfficeRepositoryError::connection))?;

        let total: i64 = listed_offices(filter)
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(query_error("count listed offices"))?;

        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let ids: Vec<i64> = ordered(listed_offices(filter), filter.order())
            .select(offices::id)
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(query_error("select listed offices"))?;

        Ok(Page::new(
            ids.into_iter().map(OfficeId::new).collect(),
            u64::try_from(total).unwrap_or_default(),
            page,
        ))
    }

    async fn load_aggregates(
        &self,
        ids: &[OfficeId],
    ) -> Result<Vec<OfficeAggregate>, OfficeRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OfficeRepositoryError::connection))?;
        let raw_ids = ids.iter().map(|id| id.value()).collect();
        let rows = load_aggregate_rows(&mut conn, raw_ids).await?;
        assemble(ids, rows)
    }

    async fn create_office(
        &self,
        office: &NewOffice,
    ) -> Result<OfficeCreation, OfficeRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OfficeRepositoryError::connection))?;
        let row = NewOfficeRow::from(office);
        let tag_ids: Vec<i64> = office.tags.iter().map(|id| id.value()).collect();

        let outcome: Result<i64, CreateFailure> = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(offices::table)
                        .values(&row)
                        .returning(offices::id)
                        .get_result(conn)
                        .await?;
                    if tag_ids.is_empty() {
                        return Ok(id);
                    }

                    // Key-share locks keep the tags alive until the links commit.
                    let present: Vec<i64> = tags::table
                        .filter(tags::id.eq_any(&tag_ids))
                        .select(tags::id)
                        .for_key_share()
                        .load(conn)
                        .await?;
                    let missing: Vec<TagId> = tag_ids
                        .iter()
                        .filter(|tag_id| !present.contains(*tag_id))
                        .map(|tag_id| TagId::new(*tag_id))
                        .collect();
                    if !missing.is_empty() {
                        return Err(CreateFailure::UnknownTags(missing));
                    }

                    let links: Vec<OfficeTagRow> = tag_ids
                        .iter()
                        .map(|tag_id| OfficeTagRow {
                            office_id: id,
                            tag_id: *tag_id,
                        })
                        .collect();
                    diesel::insert_into(offices_tags::table)
                        .values(&links)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(id) => Ok(OfficeCreation::Created(OfficeId::new(id))),
            Err(CreateFailure::UnknownTags(missing)) => {
                debug!(?missing, "office insert rolled back over missing tags");
                Ok(OfficeCreation::UnknownTags(missing))
            }
            Err(CreateFailure::Diesel(error)) => Err(query_error("insert office")(error)),
        }
    }
}
