//! Response bodies for office endpoints.
//!
//! The host's id only appears nested under `user`; timestamps never leave
//! the service.

use pagination::PageEnvelope;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Host, Image, OfficeAggregate, Tag};

/// Owner summary embedded in an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl From<Host> for UserResponse {
    fn from(value: Host) -> Self {
        Self {
            id: value.id.value(),
            name: value.name,
        }
    }
}

/// Image embedded in an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImageResponse {
    #[schema(example = 3)]
    pub id: i64,
    #[schema(example = "offices/3/front.jpg")]
    pub path: String,
}

impl From<Image> for ImageResponse {
    fn from(value: Image) -> Self {
        Self {
            id: value.id.value(),
            path: value.path,
        }
    }
}

/// Tag as listed on its own or embedded in an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "has_ac")]
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id.value(),
            name: value.name,
        }
    }
}

/// Office with its associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OfficeResponse {
    #[schema(example = 12)]
    pub id: i64,
    #[schema(example = "Harbour loft")]
    pub title: String,
    pub description: String,
    /// Decimal degrees with eight fractional digits.
    #[schema(example = "23.73977582")]
    pub latitude: String,
    /// Decimal degrees with eight fractional digits.
    #[schema(example = "90.38269977")]
    pub longitude: String,
    pub address_line1: String,
    /// `1` while pending review, `2` once approved.
    #[schema(example = 1)]
    pub approval_status: i16,
    pub hidden: bool,
    #[schema(example = 10000)]
    pub price_per_day: i32,
    #[schema(example = 0)]
    pub monthly_discount: i32,
    /// Active reservations on the office.
    pub reservations_count: u64,
    pub user: UserResponse,
    pub images: Vec<ImageResponse>,
    pub tags: Vec<TagResponse>,
}

impl From<OfficeAggregate> for OfficeResponse {
    fn from(value: OfficeAggregate) -> Self {
        let OfficeAggregate {
            office,
            host,
            tags,
            images,
            active_reservations,
        } = value;
        Self {
            id: office.id.value(),
            title: office.title,
            description: office.description,
            latitude: office.location.latitude().to_string(),
            longitude: office.location.longitude().to_string(),
            address_line1: office.address_line1,
            approval_status: office.approval_status.code(),
            hidden: office.hidden,
            price_per_day: office.price_per_day,
            monthly_discount: office.monthly_discount,
            reservations_count: active_reservations,
            user: host.into(),
            images: images.into_iter().map(ImageResponse::from).collect(),
            tags: tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// `{ "data": office }` body for single-office responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OfficeDocument {
    pub data: OfficeResponse,
}

/// `{ "data": [tag] }` body for the tag listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TagCollection {
    pub data: Vec<TagResponse>,
}

/// Paginated office listing body.
pub type OfficePage = PageEnvelope<OfficeResponse>;
