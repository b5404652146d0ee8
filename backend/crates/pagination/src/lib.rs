//! Offset pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] captures the validated `page`/`limit` pair supplied by a
//! client. A [`Page`] carries one slice of results together with the counters
//! clients use to render pagination controls.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 20).expect("valid request");
//! assert_eq!(request.offset(), 20);
//!
//! let page = Page::new(vec!["a", "b"], 41, request);
//! assert_eq!(page.total_pages(), 3);
//! assert_eq!(page.current_page(), 2);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Page number used when the client omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits `limit`.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// The requested page size falls outside `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange {
        /// Upper bound accepted for `limit`.
        max: u32,
    },
}

/// Validated one-based page number and page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Validate a page number and page size.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is out of range.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// Build a request from optional client values, applying defaults.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a supplied value is out of range.
    pub fn from_optional(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// One page of results plus the counters describing the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    total_items: u64,
    total_pages: u64,
    current_page: u32,
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from the fetched slice and the unpaginated row count.
    ///
    /// `total_pages` is `ceil(total_items / limit)`, so an empty result set
    /// reports zero pages.
    #[must_use]
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            total_items,
            total_pages: total_items.div_ceil(u64::from(request.limit())),
            current_page: request.page(),
            items,
        }
    }

    /// Total number of rows matching the query.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages needed to show every matching row.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Page number this slice represents.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert every item while keeping the counters intact.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
