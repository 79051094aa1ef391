//! Driving port for reading offices.
//!
//! The listing applies the public visibility rules; the detail lookup does
//! not, so hosts can open their own pending or hidden listing by id.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, OfficeAggregate, OfficeId, OfficeListingFilter};

/// Use-case port behind `GET /offices` and `GET /offices/{id}`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfficesQuery: Send + Sync {
    /// One page of listed offices matching `filter`. `page` is 1-based.
    async fn list_offices(
        &self,
        filter: OfficeListingFilter,
        page: u32,
    ) -> Result<Page<OfficeAggregate>, Error>;

    /// The office with `id`, whatever its approval or hidden state.
    async fn get_office(&self, id: OfficeId) -> Result<OfficeAggregate, Error>;
}
