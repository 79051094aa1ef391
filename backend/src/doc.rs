//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound layer, the schema
//! wrappers for domain and pagination types, and the bearer token security
//! scheme used by office creation.
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::office_response::{
    ImageResponse, OfficeDocument, OfficeResponse, TagCollection, TagResponse, UserResponse,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, OfficePageSchema, PageLinksSchema, PageMetaSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Personal access token. Office creation needs the office.create ability.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Office listings API",
        description = "Public office listings with distance ordering, and token-gated office creation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::offices::list_offices,
        crate::inbound::http::offices::show_office,
        crate::inbound::http::offices::create_office,
        crate::inbound::http::tags::list_tags,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        OfficeResponse,
        OfficeDocument,
        OfficePageSchema,
        PageLinksSchema,
        PageMetaSchema,
        UserResponse,
        ImageResponse,
        TagResponse,
        TagCollection,
    )),
    tags(
        (name = "offices", description = "Office listings"),
        (name = "tags", description = "Office tags")
    )
)]
pub struct ApiDoc;
