//! Office listing, detail and creation use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{info, warn};

use super::ports::{OfficeRepository, OfficesCommand, OfficesQuery, TagRepository};
use super::{
    Ability, Caller, Error, OFFICES_PER_PAGE, OfficeAggregate, OfficeCreation, OfficeId,
    OfficeListingFilter, OfficeSubmission, TagId, validate_submission,
};

/// Implements [`OfficesQuery`] and [`OfficesCommand`] over the office and
/// tag repositories.
#[derive(Clone)]
pub struct OfficeService {
    offices: Arc<dyn OfficeRepository>,
    tags: Arc<dyn TagRepository>,
}

impl OfficeService {
    /// Build the service.
    pub fn new(offices: Arc<dyn OfficeRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { offices, tags }
    }

    async fn unknown_tag_positions(&self, refs: &[(usize, TagId)]) -> Result<Vec<usize>, Error> {
        if refs.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<TagId> = refs.iter().map(|(_, id)| *id).collect();
        let known = self.tags.existing_tag_ids(&ids).await?;
        Ok(refs
            .iter()
            .filter(|(_, id)| !known.contains(id))
            .map(|(index, _)| *index)
            .collect())
    }
}

#[async_trait]
impl OfficesQuery for OfficeService {
    async fn list_offices(
        &self,
        filter: OfficeListingFilter,
        page: u32,
    ) -> Result<Page<OfficeAggregate>, Error> {
        let request = PageRequest::new(page, OFFICES_PER_PAGE)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let ids = self.offices.list_office_ids(&filter, request).await?;
        let aggregates = self.offices.load_aggregates(ids.items()).await?;
        Ok(Page::new(aggregates, ids.total(), request))
    }

    async fn get_office(&self, id: OfficeId) -> Result<OfficeAggregate, Error> {
        self.offices
            .load_aggregates(&[id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("office {id} not found")))
    }
}

#[async_trait]
impl OfficesCommand for OfficeService {
    async fn create_office(
        &self,
        caller: &Caller,
        submission: OfficeSubmission,
    ) -> Result<OfficeAggregate, Error> {
        caller.require(Ability::OfficeCreate)?;

        let mut checked = validate_submission(caller.user_id(), submission);
        for index in self.unknown_tag_positions(&checked.tag_refs).await? {
            checked.reject_unknown_tag(index);
        }
        checked.errors.clone().into_result()?;
        let office = checked
            .office
            .take()
            .ok_or_else(|| Error::internal("validated office submission is incomplete"))?;

        let id = match self.offices.create_office(&office).await? {
            OfficeCreation::Created(id) => id,
            OfficeCreation::UnknownTags(missing) => {
                warn!(?missing, "tags removed while an office was being created");
                let positions: Vec<usize> = checked
                    .tag_refs
                    .iter()
                    .filter(|(_, id)| missing.contains(id))
                    .map(|(index, _)| *index)
                    .collect();
                for index in positions {
                    checked.reject_unknown_tag(index);
                }
                checked.errors.into_result()?;
                return Err(Error::internal(
                    "storage rejected tags the submission did not reference",
                ));
            }
        };
        info!(
            office_id = %id,
            host_id = %caller.user_id(),
            approval_status = office.approval_status().as_str(),
            tags = office.tags.len(),
            "office created"
        );
        self.get_office(id).await
    }
}
