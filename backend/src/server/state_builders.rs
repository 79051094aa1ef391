//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use office_listings::domain::ports::{AccessTokenRepository, OfficeRepository, TagRepository};
use office_listings::domain::{AccessTokenAuthenticator, OfficeService, TagCatalogueService};
use office_listings::inbound::http::state::HttpState;
use office_listings::outbound::memory::InMemoryStore;
use office_listings::outbound::persistence::{
    DbPool, DieselAccessTokenRepository, DieselOfficeRepository, DieselTagRepository,
};

use super::ServerConfig;

/// Driven ports backing one server instance.
struct Repositories {
    offices: Arc<dyn OfficeRepository>,
    tags: Arc<dyn TagRepository>,
    tokens: Arc<dyn AccessTokenRepository>,
}

impl Repositories {
    fn postgres(pool: &DbPool) -> Self {
        Self {
            offices: Arc::new(DieselOfficeRepository::new(pool.clone())),
            tags: Arc::new(DieselTagRepository::new(pool.clone())),
            tokens: Arc::new(DieselAccessTokenRepository::new(pool.clone())),
        }
    }

    fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            offices: store.clone(),
            tags: store.clone(),
            tokens: store,
        }
    }
}

/// Build the handler state, using PostgreSQL when a pool is configured and
/// a fresh in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repositories = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            Repositories::postgres(pool)
        }
        None => {
            warn!("no database configured; data lives in memory and is lost on exit");
            Repositories::in_memory(InMemoryStore::with_default_tags())
        }
    };
    let Repositories {
        offices,
        tags,
        tokens,
    } = repositories;

    let office_service = Arc::new(OfficeService::new(offices, tags.clone()));
    web::Data::new(HttpState::new(
        office_service.clone(),
        office_service,
        Arc::new(TagCatalogueService::new(tags)),
        Arc::new(AccessTokenAuthenticator::new(tokens)),
    ))
}
