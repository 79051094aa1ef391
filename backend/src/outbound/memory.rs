//! In-memory store implementing every driven port.
//!
//! Backs the server when no database is configured and drives the HTTP
//! behaviour tests. Listing semantics mirror the PostgreSQL adapter:
//! the same visibility predicate, filters and distance ordering, with office
//! id breaking ties. All state sits behind one mutex, so each port call is a
//! single critical section.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{
    AccessTokenRepository, AccessTokenRepositoryError, OfficeRepository, OfficeRepositoryError,
    TagRepository, TagRepositoryError,
};
use crate::domain::{
    AccessTokenRecord, ApprovalStatus, DEFAULT_TAG_NAMES, Host, Image, ImageId, ImageOwner,
    ListingOrder, NewAccessToken, NewOffice, Office, OfficeAggregate, OfficeCreation, OfficeId,
    OfficeListingFilter, PlainToken, ReservationStatus, Tag, TagId, TokenHash, UserId,
    distance_score,
};

#[derive(Debug, Clone)]
struct StoredOffice {
    office: Office,
    tags: Vec<TagId>,
    deleted: bool,
}

impl StoredOffice {
    fn is_listed(&self) -> bool {
        !self.deleted
            && !self.office.hidden
            && self.office.approval_status == ApprovalStatus::Approved
    }
}

#[derive(Debug, Clone, Copy)]
struct StoredReservation {
    user_id: UserId,
    office_id: OfficeId,
    status: ReservationStatus,
}

#[derive(Debug, Clone)]
struct StoredToken {
    user_id: UserId,
    abilities: Vec<String>,
    last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, Host>,
    tags: BTreeMap<TagId, Tag>,
    offices: BTreeMap<OfficeId, StoredOffice>,
    images: BTreeMap<ImageId, Image>,
    reservations: Vec<StoredReservation>,
    tokens: HashMap<TokenHash, StoredToken>,
    last_user_id: i64,
    last_tag_id: i64,
    last_office_id: i64,
    last_image_id: i64,
}

impl StoreState {
    fn insert_office(&mut self, office: &NewOffice, status: ApprovalStatus) -> OfficeId {
        self.last_office_id += 1;
        let id = OfficeId::new(self.last_office_id);
        let mut tags = office.tags.clone();
        tags.sort_unstable();
        tags.dedup();
        self.offices.insert(
            id,
            StoredOffice {
                office: Office {
                    id,
                    host_id: office.host_id,
                    title: office.title.clone(),
                    description: office.description.clone(),
                    location: office.location,
                    address_line1: office.address_line1.clone(),
                    approval_status: status,
                    hidden: office.hidden,
                    price_per_day: office.price_per_day,
                    monthly_discount: office.monthly_discount,
                },
                tags,
                deleted: false,
            },
        );
        id
    }

    fn matches(&self, stored: &StoredOffice, filter: &OfficeListingFilter) -> bool {
        if !stored.is_listed() {
            return false;
        }
        if filter
            .host_id
            .is_some_and(|host_id| stored.office.host_id != host_id)
        {
            return false;
        }
        if let Some(visitor_id) = filter.visitor_id {
            let reserved = self
                .reservations
                .iter()
                .any(|r| r.office_id == stored.office.id && r.user_id == visitor_id);
            if !reserved {
                return false;
            }
        }
        true
    }

    fn aggregate(&self, stored: &StoredOffice) -> Result<OfficeAggregate, OfficeRepositoryError> {
        let office = &stored.office;
        let host = self.users.get(&office.host_id).cloned().ok_or_else(|| {
            OfficeRepositoryError::query(format!(
                "office {} references missing host {}",
                office.id, office.host_id
            ))
        })?;
        let tags = stored
            .tags
            .iter()
            .filter_map(|id| self.tags.get(id).cloned())
            .collect();
        let images = self
            .images
            .values()
            .filter(|image| image.owner.as_office() == Some(office.id))
            .cloned()
            .collect();
        let active_reservations = self
            .reservations
            .iter()
            .filter(|r| r.office_id == office.id && r.status == ReservationStatus::Active)
            .count() as u64;
        Ok(OfficeAggregate {
            office: office.clone(),
            host,
            tags,
            images,
            active_reservations,
        })
    }
}

/// Shared in-memory store. Clones share the same state.
///
/// # Examples
/// ```
/// use office_listings::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let host = store.add_user("Ada");
/// assert_eq!(host.value(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the default tags.
    pub fn with_default_tags() -> Self {
        let store = Self::new();
        for name in DEFAULT_TAG_NAMES {
            store.add_tag(name);
        }
        store
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Register a user and return their id.
    pub fn add_user(&self, name: impl Into<String>) -> UserId {
        let mut state = self.state();
        state.last_user_id += 1;
        let id = UserId::new(state.last_user_id);
        state.users.insert(id, Host::new(id, name));
        id
    }

    /// Register a tag and return its id.
    pub fn add_tag(&self, name: impl Into<String>) -> TagId {
        let mut state = self.state();
        state.last_tag_id += 1;
        let id = TagId::new(state.last_tag_id);
        state.tags.insert(id, Tag::new(id, name));
        id
    }

    /// Store an office with an explicit approval status, bypassing the
    /// pending default applied to submissions.
    pub fn add_office(&self, office: NewOffice, status: ApprovalStatus) -> OfficeId {
        self.state().insert_office(&office, status)
    }

    /// Flag an office as soft-deleted. Returns `false` for unknown ids.
    pub fn soft_delete_office(&self, id: OfficeId) -> bool {
        match self.state().offices.get_mut(&id) {
            Some(stored) => {
                stored.deleted = true;
                true
            }
            None => false,
        }
    }

    /// Attach an image to `owner`.
    pub fn add_image(&self, owner: ImageOwner, path: impl Into<String>) -> ImageId {
        let mut state = self.state();
        state.last_image_id += 1;
        let id = ImageId::new(state.last_image_id);
        state.images.insert(
            id,
            Image {
                id,
                path: path.into(),
                owner,
            },
        );
        id
    }

    /// Record a reservation of `office_id` by `user_id`.
    pub fn add_reservation(&self, user_id: UserId, office_id: OfficeId, status: ReservationStatus) {
        self.state().reservations.push(StoredReservation {
            user_id,
            office_id,
            status,
        });
    }

    /// Generate and store a token for `user_id`, returning the plaintext.
    pub fn issue_token<I, S>(&self, user_id: UserId, abilities: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let token = PlainToken::generate();
        self.state().tokens.insert(
            token.hash(),
            StoredToken {
                user_id,
                abilities: abilities.into_iter().map(Into::into).collect(),
                last_used_at: None,
            },
        );
        token.expose().to_owned()
    }

    /// Number of stored offices, soft-deleted ones included.
    pub fn office_count(&self) -> usize {
        self.state().offices.len()
    }

    /// When the token stored under `hash` was last presented.
    pub fn token_last_used(&self, hash: &TokenHash) -> Option<DateTime<Utc>> {
        self.state()
            .tokens
            .get(hash)
            .and_then(|token| token.last_used_at)
    }
}

#[async_trait]
impl OfficeRepository for InMemoryStore {
    async fn list_office_ids(
        &self,
        filter: &OfficeListingFilter,
        page: PageRequest,
    ) -> Result<Page<OfficeId>, OfficeRepositoryError> {
        let state = self.state();
        let mut matching: Vec<&StoredOffice> = state
            .offices
            .values()
            .filter(|stored| state.matches(stored, filter))
            .collect();
        if let ListingOrder::NearestTo(point) = filter.order() {
            matching.sort_by(|a, b| {
                distance_score(&point, &a.office.location)
                    .total_cmp(&distance_score(&point, &b.office.location))
                    .then(a.office.id.cmp(&b.office.id))
            });
        }

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let ids = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| stored.office.id)
            .collect();
        Ok(Page::new(ids, total, page))
    }

    async fn load_aggregates(
        &self,
        ids: &[OfficeId],
    ) -> Result<Vec<OfficeAggregate>, OfficeRepositoryError> {
        let state = self.state();
        ids.iter()
            .filter_map(|id| state.offices.get(id).filter(|stored| !stored.deleted))
            .map(|stored| state.aggregate(stored))
            .collect()
    }

    async fn create_office(
        &self,
        office: &NewOffice,
    ) -> Result<OfficeCreation, OfficeRepositoryError> {
        let mut state = self.state();
        if !state.users.contains_key(&office.host_id) {
            return Err(OfficeRepositoryError::query(format!(
                "host {} does not exist",
                office.host_id
            )));
        }
        let missing: Vec<TagId> = office
            .tags
            .iter()
            .copied()
            .filter(|id| !state.tags.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Ok(OfficeCreation::UnknownTags(missing));
        }
        let id = state.insert_office(office, office.approval_status());
        debug!(office_id = %id, "office stored in memory");
        Ok(OfficeCreation::Created(id))
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list_tags(&self) -> Result<Vec<Tag>, TagRepositoryError> {
        Ok(self.state().tags.values().cloned().collect())
    }

    async fn existing_tag_ids(&self, ids: &[TagId]) -> Result<Vec<TagId>, TagRepositoryError> {
        let state = self.state();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.tags.contains_key(id))
            .collect())
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryStore {
    async fn find_by_hash(
        &self,
        hash: &TokenHash,
    ) -> Result<Option<AccessTokenRecord>, AccessTokenRepositoryError> {
        let mut state = self.state();
        Ok(state.tokens.get_mut(hash).map(|token| {
            token.last_used_at = Some(Utc::now());
            AccessTokenRecord {
                user_id: token.user_id,
                abilities: token.abilities.clone(),
            }
        }))
    }

    async fn store(&self, token: &NewAccessToken) -> Result<(), AccessTokenRepositoryError> {
        let mut state = self.state();
        if state.tokens.contains_key(&token.hash) {
            return Err(AccessTokenRepositoryError::query("token hash already stored"));
        }
        state.tokens.insert(
            token.hash.clone(),
            StoredToken {
                user_id: token.user_id,
                abilities: token.abilities.clone(),
                last_used_at: None,
            },
        );
        Ok(())
    }
}
