//! Page-number pagination primitives shared by backend endpoints.
//!
//! The crate models three stages of a paginated read:
//!
//! - [`PageRequest`]: the validated page number and page size a caller asked
//!   for, plus the derived SQL `LIMIT`/`OFFSET` values.
//! - [`Page`]: one slice of results together with the total number of
//!   matching items.
//! - [`PageEnvelope`]: the wire envelope (`data`, `links`, `meta`) rendered
//!   against the request URL so clients can follow `first`/`prev`/`next`/`last`
//!   links without rebuilding query strings.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageEnvelope, PageRequest};
//! use url::Url;
//!
//! let request = PageRequest::new(2, 2).expect("valid request");
//! let page = Page::new(vec!["c", "d"], 5, request);
//! let base = Url::parse("https://example.test/api/v1/offices?host_id=7").expect("url");
//! let envelope = PageEnvelope::from_page(page, &base);
//!
//! assert_eq!(envelope.meta.last_page, 3);
//! assert_eq!(
//!     envelope.links.next.as_deref(),
//!     Some("https://example.test/api/v1/offices?host_id=7&page=3")
//! );
//! ```

mod envelope;
mod page;
mod request;

pub use envelope::{PageEnvelope, PageLinks, PageMeta};
pub use page::Page;
pub use request::{DEFAULT_PER_PAGE, PAGE_QUERY_PARAM, PageRequest, PageRequestError};
