//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod office_payload;
pub mod office_response;
pub mod offices;
pub mod schemas;
pub mod state;
pub mod tags;
pub mod validation;

pub use error::ApiResult;

/// Register every API handler. Mount under `/api/v1`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use office_listings::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(offices::list_offices)
        .service(offices::create_office)
        .service(offices::show_office)
        .service(tags::list_tags);
}
