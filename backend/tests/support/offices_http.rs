//! HTTP helpers for the office listing integration tests.
//!
//! Integration tests under `backend/tests/` compile as separate crates, so
//! the app wiring and the seed builders live here and each test crate pulls
//! the file in with `#[path]`.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use office_listings::Trace;
use office_listings::domain::{
    AccessTokenAuthenticator, Coordinates, NewOffice, OfficeService, TRACE_ID_HEADER,
    TagCatalogueService, TagId, UserId,
};
use office_listings::inbound::http::configure_api;
use office_listings::inbound::http::state::HttpState;
use office_listings::outbound::memory::InMemoryStore;
use rust_decimal::Decimal;
use serde_json::Value;

/// Coordinates used by the distance ordering tests.
pub const DHAKA: (&str, &str) = ("24.3613168287183", "88.60688992824939");
pub const RAJSHAHI: (&str, &str) = ("23.73977582064981", "90.38269976914796");

/// A response reduced to what the tests inspect.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

impl Reply {
    /// Titles of the offices in a listing body, in response order.
    pub fn titles(&self) -> Vec<String> {
        self.data()
            .iter()
            .filter_map(|office| office["title"].as_str().map(str::to_owned))
            .collect()
    }

    /// Ids of the offices in a listing body, in response order.
    pub fn ids(&self) -> Vec<i64> {
        self.data()
            .iter()
            .filter_map(|office| office["id"].as_i64())
            .collect()
    }

    fn data(&self) -> &[Value] {
        self.body["data"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Handler state wired to `store` the same way the server binary wires it.
pub fn http_state(store: &InMemoryStore) -> web::Data<HttpState> {
    let shared = Arc::new(store.clone());
    let offices = Arc::new(OfficeService::new(shared.clone(), shared.clone()));
    web::Data::new(HttpState::new(
        offices.clone(),
        offices,
        Arc::new(TagCatalogueService::new(shared.clone())),
        Arc::new(AccessTokenAuthenticator::new(shared)),
    ))
}

/// Run `request` against a fresh app over `store`.
pub async fn send(store: &InMemoryStore, request: TestRequest) -> Reply {
    let app = test::init_service(
        App::new()
            .app_data(http_state(store))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// `GET` request for `uri`.
pub fn get(uri: &str) -> TestRequest {
    TestRequest::get().uri(uri)
}

/// `POST /api/v1/offices` with a JSON body and an optional bearer token.
pub fn post_office(token: Option<&str>, body: &Value) -> TestRequest {
    let request = TestRequest::post()
        .uri("/api/v1/offices")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string());
    match token {
        Some(token) => request.insert_header((AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    }
}

/// Parse decimal degrees.
pub fn degrees(raw: &str) -> Decimal {
    raw.parse().expect("decimal degrees")
}

/// A visible office for `host` at `(latitude, longitude)`.
pub fn office_at(host: UserId, title: &str, (latitude, longitude): (&str, &str)) -> NewOffice {
    NewOffice {
        host_id: host,
        title: title.to_owned(),
        description: format!("Desks and meeting rooms in {title}"),
        location: Coordinates::new(degrees(latitude), degrees(longitude)),
        address_line1: "12 Lake Road".to_owned(),
        hidden: false,
        price_per_day: 1_500,
        monthly_discount: 0,
        tags: Vec::new(),
    }
}

/// A visible office for `host` in Dhaka.
pub fn office(host: UserId, title: &str) -> NewOffice {
    office_at(host, title, DHAKA)
}

/// `office` flagged as hidden.
pub fn hidden(mut office: NewOffice) -> NewOffice {
    office.hidden = true;
    office
}

/// `office` carrying `tags`.
pub fn tagged(mut office: NewOffice, tags: &[TagId]) -> NewOffice {
    office.tags = tags.to_vec();
    office
}
