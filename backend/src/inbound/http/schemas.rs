//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain and pagination types remain framework-agnostic. The wrappers here
//! mirror their serialised structure and live in the inbound adapter layer
//! where framework concerns belong.

use utoipa::ToSchema;

use super::office_response::OfficeResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, such as an unparseable filter.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Submitted fields failed validation.
    #[schema(rename = "unprocessable_entity")]
    UnprocessableEntity,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "unprocessable_entity")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "The given data was invalid.")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as `{"errors": {"title": [...]}}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`pagination::PageLinks`].
#[derive(ToSchema)]
#[schema(as = pagination::PageLinks)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageLinksSchema {
    #[schema(example = "http://localhost:8080/api/v1/offices?page=1")]
    first: String,
    #[schema(example = "http://localhost:8080/api/v1/offices?page=3")]
    last: String,
    prev: Option<String>,
    next: Option<String>,
}

/// OpenAPI schema for [`pagination::PageMeta`].
#[derive(ToSchema)]
#[schema(as = pagination::PageMeta)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageMetaSchema {
    #[schema(example = 1)]
    current_page: u32,
    from: Option<u64>,
    last_page: u32,
    #[schema(example = "http://localhost:8080/api/v1/offices")]
    path: String,
    #[schema(example = 20)]
    per_page: u32,
    to: Option<u64>,
    total: u64,
}

/// OpenAPI schema for a page of offices.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OfficePageSchema {
    data: Vec<OfficeResponse>,
    links: PageLinksSchema,
    meta: PageMetaSchema,
}
