//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CallerAuthenticator, OfficesCommand, OfficesQuery, TagsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub offices: Arc<dyn OfficesQuery>,
    pub office_commands: Arc<dyn OfficesCommand>,
    pub tags: Arc<dyn TagsQuery>,
    pub authenticator: Arc<dyn CallerAuthenticator>,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use office_listings::domain::{AccessTokenAuthenticator, OfficeService, TagCatalogueService};
    /// use office_listings::inbound::http::state::HttpState;
    /// use office_listings::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let offices = Arc::new(OfficeService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(
    ///     offices.clone(),
    ///     offices,
    ///     Arc::new(TagCatalogueService::new(store.clone())),
    ///     Arc::new(AccessTokenAuthenticator::new(store)),
    /// );
    /// let _tags = state.tags.clone();
    /// ```
    pub fn new(
        offices: Arc<dyn OfficesQuery>,
        office_commands: Arc<dyn OfficesCommand>,
        tags: Arc<dyn TagsQuery>,
        authenticator: Arc<dyn CallerAuthenticator>,
    ) -> Self {
        Self {
            offices,
            office_commands,
            tags,
            authenticator,
        }
    }
}
