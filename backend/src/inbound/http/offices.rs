//! Office API handlers.
//!
//! ```text
//! GET  /api/v1/offices?host_id=1&visitor_id=2&latitude=23.7&longitude=90.3&page=1
//! GET  /api/v1/offices/{id}
//! POST /api/v1/offices   (Authorization: Bearer <token>)
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::PageEnvelope;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Ability, Coordinates, Error, OfficeId, OfficeListingFilter, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::office_payload::decode_submission;
use crate::inbound::http::office_response::{OfficeDocument, OfficePage, OfficeResponse};
use crate::inbound::http::schemas::{ErrorSchema, OfficePageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_pair_error, parse_optional_decimal, parse_optional_id, parse_page,
};

const HOST_ID: FieldName = FieldName::new("host_id");
const VISITOR_ID: FieldName = FieldName::new("visitor_id");
const LATITUDE: FieldName = FieldName::new("latitude");
const LONGITUDE: FieldName = FieldName::new("longitude");
const PAGE: FieldName = FieldName::new("page");

/// Raw listing query parameters, validated by [`ListOfficesQuery::parse`].
#[derive(Debug, Default, Deserialize)]
pub struct ListOfficesQuery {
    pub host_id: Option<String>,
    pub visitor_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub page: Option<String>,
}

impl ListOfficesQuery {
    /// Validate every parameter into a filter and a 1-based page number.
    pub fn parse(&self) -> Result<(OfficeListingFilter, u32), Error> {
        let mut filter = OfficeListingFilter::default();
        if let Some(host) = parse_optional_id::<UserId>(self.host_id.as_deref(), HOST_ID)? {
            filter = filter.with_host(host);
        }
        if let Some(visitor) = parse_optional_id::<UserId>(self.visitor_id.as_deref(), VISITOR_ID)? {
            filter = filter.with_visitor(visitor);
        }
        let latitude = parse_optional_decimal(self.latitude.as_deref(), LATITUDE)?;
        let longitude = parse_optional_decimal(self.longitude.as_deref(), LONGITUDE)?;
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                filter = filter.near(Coordinates::new(latitude, longitude));
            }
            (Some(_), None) => {
                return Err(missing_pair_error(
                    LATITUDE,
                    LONGITUDE,
                    self.latitude.as_deref().unwrap_or_default(),
                ));
            }
            (None, Some(_)) => {
                return Err(missing_pair_error(
                    LONGITUDE,
                    LATITUDE,
                    self.longitude.as_deref().unwrap_or_default(),
                ));
            }
            (None, None) => {}
        }
        let page = parse_page(self.page.as_deref(), PAGE)?;
        Ok((filter, page))
    }
}

/// List approved, visible offices.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use office_listings::inbound::http::offices::list_offices;
///
/// let app = App::new().service(list_offices);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/offices",
    params(
        ("host_id" = Option<i64>, Query, description = "Only offices owned by this user"),
        ("visitor_id" = Option<i64>, Query, description = "Only offices this user has reserved"),
        ("latitude" = Option<String>, Query, description = "Rank by distance; requires longitude"),
        ("longitude" = Option<String>, Query, description = "Rank by distance; requires latitude"),
        ("page" = Option<u32>, Query, description = "1-based page number, 20 offices per page")
    ),
    responses(
        (status = 200, description = "Page of offices", body = OfficePageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["offices"],
    operation_id = "listOffices",
    security([])
)]
#[get("/offices")]
pub async fn list_offices(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<ListOfficesQuery>,
) -> ApiResult<web::Json<OfficePage>> {
    let (filter, page) = query.parse()?;
    debug!(?filter, page, "listing offices");
    let offices = state.offices.list_offices(filter, page).await?;
    let base = request.full_url();
    Ok(web::Json(PageEnvelope::from_page(
        offices.map(OfficeResponse::from),
        &base,
    )))
}

/// Show one office regardless of its approval or hidden state.
#[utoipa::path(
    get,
    path = "/api/v1/offices/{id}",
    params(("id" = i64, Path, description = "Office identifier")),
    responses(
        (status = 200, description = "Office", body = OfficeDocument),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["offices"],
    operation_id = "showOffice",
    security([])
)]
#[get("/offices/{id}")]
pub async fn show_office(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OfficeDocument>> {
    let raw = path.into_inner();
    let id: OfficeId = raw
        .parse()
        .map_err(|_| Error::not_found(format!("office {raw} not found")))?;
    let office = state.offices.get_office(id).await?;
    Ok(web::Json(OfficeDocument {
        data: office.into(),
    }))
}

/// Create an office owned by the caller. New offices await approval.
#[utoipa::path(
    post,
    path = "/api/v1/offices",
    request_body(
        content = serde_json::Value,
        description = "title, description, latitude, longitude, address_line1, hidden, price_per_day, monthly_discount, tags"
    ),
    responses(
        (status = 201, description = "Office created", body = OfficeDocument),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["offices"],
    operation_id = "createOffice",
    security(("BearerToken" = []))
)]
#[post("/offices")]
pub async fn create_office(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let caller = caller.into_inner();
    caller.require(Ability::OfficeCreate)?;
    let submission = decode_submission(&body)?;
    let office = state
        .office_commands
        .create_office(&caller, submission)
        .await?;
    Ok(HttpResponse::Created().json(OfficeDocument {
        data: office.into(),
    }))
}
