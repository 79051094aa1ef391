//! Validated page requests.

/// Page size used when an endpoint does not choose its own.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Query-string parameter carrying the 1-based page number.
pub const PAGE_QUERY_PARAM: &str = "page";

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// Pages must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPerPage,
}

/// A 1-based page number paired with a fixed page size.
///
/// # Examples
///
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 20).expect("valid request");
/// assert_eq!(request.offset(), 40);
/// assert_eq!(request.limit(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a request for `page` holding `per_page` items.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] when `page` is zero and
    /// [`PageRequestError::ZeroPerPage`] when `per_page` is zero.
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PageRequestError::ZeroPerPage);
        }
        Ok(Self { page, per_page })
    }

    /// First page using [`DEFAULT_PER_PAGE`].
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Number of items to fetch for this page.
    #[must_use]
    pub fn limit(self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}
