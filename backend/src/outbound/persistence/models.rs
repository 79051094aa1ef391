//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    ApprovalStatus, Coordinates, Host, Image, ImageId, ImageOwner, ImageOwnerKind, NewOffice,
    Office, OfficeId, Tag, TagId, UserId,
};

use super::schema::{images, offices, offices_tags, personal_access_tokens, tags, users};

/// Row struct for reading hosts from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
}

impl From<UserRow> for Host {
    fn from(row: UserRow) -> Self {
        Host::new(UserId::new(row.id), row.name)
    }
}

/// Row struct for reading from the tags table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub name: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag::new(TagId::new(row.id), row.name)
    }
}

// ---------------------------------------------------------------------------
// Office models
// ---------------------------------------------------------------------------

/// Row struct for reading from the offices table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OfficeRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub address_line1: String,
    pub approval_status: i16,
    pub hidden: bool,
    pub price_per_day: i32,
    pub monthly_discount: i32,
}

impl TryFrom<OfficeRow> for Office {
    type Error = String;

    fn try_from(row: OfficeRow) -> Result<Self, Self::Error> {
        let approval_status = ApprovalStatus::from_code(row.approval_status).ok_or_else(|| {
            format!(
                "office {} has unknown approval status {}",
                row.id, row.approval_status
            )
        })?;
        Ok(Office {
            id: OfficeId::new(row.id),
            host_id: UserId::new(row.user_id),
            title: row.title,
            description: row.description,
            location: Coordinates::new(row.latitude, row.longitude),
            address_line1: row.address_line1,
            approval_status,
            hidden: row.hidden,
            price_per_day: row.price_per_day,
            monthly_discount: row.monthly_discount,
        })
    }
}

/// Insertable struct for creating office records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offices)]
pub(crate) struct NewOfficeRow<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub address_line1: &'a str,
    pub approval_status: i16,
    pub hidden: bool,
    pub price_per_day: i32,
    pub monthly_discount: i32,
}

impl<'a> From<&'a NewOffice> for NewOfficeRow<'a> {
    fn from(office: &'a NewOffice) -> Self {
        Self {
            user_id: office.host_id.value(),
            title: &office.title,
            description: &office.description,
            latitude: office.location.latitude(),
            longitude: office.location.longitude(),
            address_line1: &office.address_line1,
            approval_status: office.approval_status().code(),
            hidden: office.hidden,
            price_per_day: office.price_per_day,
            monthly_discount: office.monthly_discount,
        }
    }
}

/// Insertable struct for office/tag links.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = offices_tags)]
pub(crate) struct OfficeTagRow {
    pub office_id: i64,
    pub tag_id: i64,
}

// ---------------------------------------------------------------------------
// Image models
// ---------------------------------------------------------------------------

/// Row struct for reading from the images table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ImageRow {
    pub id: i64,
    pub resource_type: String,
    pub resource_id: i64,
    pub path: String,
}

impl TryFrom<ImageRow> for Image {
    type Error = String;

    fn try_from(row: ImageRow) -> Result<Self, Self::Error> {
        let kind: ImageOwnerKind = row
            .resource_type
            .parse()
            .map_err(|err| format!("image {}: {err}", row.id))?;
        Ok(Image {
            id: ImageId::new(row.id),
            path: row.path,
            owner: ImageOwner {
                kind,
                id: row.resource_id,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Access token models
// ---------------------------------------------------------------------------

/// Row struct for reading token owners and abilities.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = personal_access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccessTokenRow {
    pub id: i64,
    pub user_id: i64,
    pub abilities: Vec<String>,
}

/// Insertable struct for storing a hashed token.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = personal_access_tokens)]
pub(crate) struct NewAccessTokenRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub token_hash: &'a str,
    pub abilities: Vec<String>,
}
