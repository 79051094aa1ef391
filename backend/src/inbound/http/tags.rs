//! Tag API handlers.
//!
//! ```text
//! GET /api/v1/tags
//! ```

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::office_response::{TagCollection, TagResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List every tag an office can carry.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Tags", body = TagCollection),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<TagCollection>> {
    let tags = state.tags.list_tags().await?;
    Ok(web::Json(TagCollection {
        data: tags.into_iter().map(TagResponse::from).collect(),
    }))
}
