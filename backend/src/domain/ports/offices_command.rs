//! Driving port for creating offices.

use async_trait::async_trait;

use crate::domain::{Caller, Error, OfficeAggregate, OfficeSubmission};

/// Use-case port behind `POST /offices`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfficesCommand: Send + Sync {
    /// Create an office owned by `caller`.
    ///
    /// Fails with `forbidden` before looking at `submission` when the caller
    /// lacks `office.create`, and with `unprocessable_entity` listing every
    /// failing field otherwise.
    async fn create_office(
        &self,
        caller: &Caller,
        submission: OfficeSubmission,
    ) -> Result<OfficeAggregate, Error>;
}
