//! A single page of results with its total count.

use crate::PageRequest;

/// One page of items plus the total number of items across all pages.
///
/// # Examples
///
/// ```
/// use pagination::{Page, PageRequest};
///
/// let page = Page::new(vec![1, 2], 42, PageRequest::new(3, 20).expect("request"));
/// assert_eq!(page.last_page(), 3);
/// assert_eq!(page.from(), Some(41));
/// assert_eq!(page.to(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Assemble a page from its items, the overall total, and the request
    /// that produced it.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total number of items across every page.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Highest page number holding items; `1` when there are none.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let pages = self.total.div_ceil(self.request.limit()).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based position of the first item on this page, if any.
    #[must_use]
    pub fn from(&self) -> Option<u64> {
        (!self.items.is_empty()).then(|| self.request.offset() + 1)
    }

    /// 1-based position of the last item on this page, if any.
    #[must_use]
    pub fn to(&self) -> Option<u64> {
        let len = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        (!self.items.is_empty()).then(|| self.request.offset() + len)
    }

    /// Page number before this one, if this is not the first page.
    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        self.request.page().checked_sub(1).filter(|page| *page >= 1)
    }

    /// Page number after this one, if more items remain.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        let current = self.request.page();
        (current < self.last_page()).then(|| current + 1)
    }

    /// Transform every item while keeping the pagination state.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(page: u32, per_page: u32) -> PageRequest {
        PageRequest::new(page, per_page).expect("valid request")
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(40, 2)]
    fn last_page_rounds_up(#[case] total: u64, #[case] expected: u32) {
        let page: Page<u8> = Page::new(Vec::new(), total, request(1, 20));
        assert_eq!(page.last_page(), expected);
    }

    #[rstest]
    fn empty_page_has_no_bounds() {
        let page: Page<u8> = Page::new(Vec::new(), 0, request(1, 20));
        assert_eq!(page.from(), None);
        assert_eq!(page.to(), None);
        assert_eq!(page.previous_page(), None);
        assert_eq!(page.next_page(), None);
    }

    #[rstest]
    fn middle_page_links_both_ways() {
        let page = Page::new(vec!['c', 'd'], 6, request(2, 2));
        assert_eq!(page.from(), Some(3));
        assert_eq!(page.to(), Some(4));
        assert_eq!(page.previous_page(), Some(1));
        assert_eq!(page.next_page(), Some(3));
    }

    #[rstest]
    fn map_preserves_totals() {
        let page = Page::new(vec![1, 2, 3], 23, request(1, 20)).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20, 30]);
        assert_eq!(page.total(), 23);
        assert_eq!(page.next_page(), Some(2));
    }
}
