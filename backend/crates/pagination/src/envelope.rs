//! Wire envelope for paginated collections.

use serde::Serialize;
use url::Url;

use crate::{PAGE_QUERY_PARAM, Page};

/// Navigation links for a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// Link to page 1.
    pub first: String,
    /// Link to the last page holding items.
    pub last: String,
    /// Link to the previous page, absent on the first page.
    pub prev: Option<String>,
    /// Link to the next page, absent on the last page.
    pub next: Option<String>,
}

/// Counters describing where a page sits in the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// The 1-based page number returned.
    pub current_page: u32,
    /// Position of the first item on the page, absent when empty.
    pub from: Option<u64>,
    /// Highest page number holding items.
    pub last_page: u32,
    /// Request URL without its query string.
    pub path: String,
    /// Page size.
    pub per_page: u32,
    /// Position of the last item on the page, absent when empty.
    pub to: Option<u64>,
    /// Number of items across every page.
    pub total: u64,
}

/// `{ data, links, meta }` response body for a page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEnvelope<T> {
    /// Items on the page.
    pub data: Vec<T>,
    /// Navigation links.
    pub links: PageLinks,
    /// Position counters.
    pub meta: PageMeta,
}

impl<T> PageEnvelope<T> {
    /// Render `page` against the URL that requested it.
    ///
    /// Links keep every query parameter of `base` except the page number,
    /// which is replaced.
    #[must_use]
    pub fn from_page(page: Page<T>, base: &Url) -> Self {
        let request = page.request();
        let last_page = page.last_page();
        let links = PageLinks {
            first: page_url(base, 1),
            last: page_url(base, last_page),
            prev: page.previous_page().map(|number| page_url(base, number)),
            next: page.next_page().map(|number| page_url(base, number)),
        };
        let meta = PageMeta {
            current_page: request.page(),
            from: page.from(),
            last_page,
            path: path_of(base),
            per_page: request.per_page(),
            to: page.to(),
            total: page.total(),
        };
        Self {
            data: page.into_items(),
            links,
            meta,
        }
    }
}

fn path_of(base: &Url) -> String {
    let mut path = base.clone();
    path.set_query(None);
    path.set_fragment(None);
    path.to_string()
}

fn page_url(base: &Url, page: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_QUERY_PARAM, &page.to_string());
    url.to_string()
}
