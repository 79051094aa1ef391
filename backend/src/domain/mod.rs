//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed office listing entities used by the API
//! and persistence layers, together with the services implementing the
//! driving ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode / FieldErrors: transport-agnostic failures.
//! - Office, NewOffice, OfficeAggregate: listings and their associations.
//! - OfficeListingFilter: listing predicates and ordering.
//! - OfficeSubmission: raw creation input and its validation.
//! - Caller / Ability: authenticated users and token scopes.
//! - OfficeService, TagCatalogueService, AccessTokenAuthenticator: use-cases.

pub mod access_token;
pub mod aggregate;
pub mod caller;
pub mod error;
pub mod geo;
pub mod ids;
pub mod image;
pub mod listing;
pub mod office;
pub mod office_service;
pub mod office_submission;
pub mod ports;
pub mod reservation;
pub mod tag;
pub mod tag_service;
pub mod trace_id;
pub mod user;

pub use self::access_token::{
    AccessTokenAuthenticator, AccessTokenRecord, NewAccessToken, PlainToken, TOKEN_LENGTH,
    TokenHash,
};
pub use self::aggregate::OfficeAggregate;
pub use self::caller::{Ability, Caller, WILDCARD_ABILITY};
pub use self::error::{Error, ErrorCode, FieldErrors};
pub use self::geo::{SQL_DISTANCE_SCORE, distance_score};
pub use self::ids::{ImageId, OfficeId, TagId, UserId};
pub use self::image::{Image, ImageOwner, ImageOwnerKind, UnknownImageOwnerKind};
pub use self::listing::{ListingOrder, OFFICES_PER_PAGE, OfficeListingFilter};
pub use self::office::{
    ApprovalStatus, COORDINATE_SCALE, Coordinates, NewOffice, Office, OfficeCreation,
};
pub use self::office_service::OfficeService;
pub use self::office_submission::{
    CheckedSubmission, FieldInput, MAX_MONTHLY_DISCOUNT, MIN_PRICE_PER_DAY, OfficeSubmission,
    validate_submission,
};
pub use self::reservation::ReservationStatus;
pub use self::tag::{DEFAULT_TAG_NAMES, Tag};
pub use self::tag_service::TagCatalogueService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::Host;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use office_listings::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
