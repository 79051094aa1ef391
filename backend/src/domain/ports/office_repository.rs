//! Driven port for office storage.
//!
//! Adapters own three jobs: selecting the listed offices for a page, loading
//! full aggregates for a set of ids, and inserting a new office with its tag
//! links atomically. Soft-deleted offices are invisible to every method.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewOffice, OfficeAggregate, OfficeCreation, OfficeId, OfficeListingFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by office storage adapters.
    pub enum OfficeRepositoryError {
        /// Storage could not be reached.
        Connection => ServiceUnavailable, "office storage connection failed: {message}",
        /// A query or write failed.
        Query => InternalError, "office storage query failed: {message}",
    }
}

/// Persistence port for offices and their associations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfficeRepository: Send + Sync {
    /// Ids of the approved, visible, non-deleted offices matching `filter`
    /// on the requested page, in listing order, together with the number of
    /// matches across all pages.
    async fn list_office_ids(
        &self,
        filter: &OfficeListingFilter,
        page: PageRequest,
    ) -> Result<Page<OfficeId>, OfficeRepositoryError>;

    /// Aggregates for `ids` in the same order. Unknown and soft-deleted ids
    /// are skipped; approval and visibility are not checked.
    async fn load_aggregates(
        &self,
        ids: &[OfficeId],
    ) -> Result<Vec<OfficeAggregate>, OfficeRepositoryError>;

    /// Insert `office` as pending together with its tag links in one
    /// transaction. Tags that no longer exist abort the whole insert and are
    /// reported through [`OfficeCreation::UnknownTags`].
    async fn create_office(
        &self,
        office: &NewOffice,
    ) -> Result<OfficeCreation, OfficeRepositoryError>;
}
