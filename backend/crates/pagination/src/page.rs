//! Page request and page result envelope.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::PaginationError;

/// Zero-based page coordinates requested by a caller.
///
/// ## Invariants
/// - `page_size` is strictly positive.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 25).expect("valid request");
/// assert_eq!(request.offset(), 50);
/// assert!(PageRequest::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_number: usize,
    page_size: NonZeroUsize,
}

impl PageRequest {
    /// Build a request, rejecting a zero page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageSize`] when `page_size` is zero.
    pub fn new(page_number: usize, page_size: usize) -> Result<Self, PaginationError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(PaginationError::InvalidPageSize)?;
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// First page with the given non-zero size.
    #[must_use]
    pub const fn first(page_size: NonZeroUsize) -> Self {
        Self {
            page_number: 0,
            page_size,
        }
    }

    /// Cap the page size at `max`, keeping the page number.
    #[must_use]
    pub fn clamped(self, max: NonZeroUsize) -> Self {
        Self {
            page_number: self.page_number,
            page_size: self.page_size.min(max),
        }
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_number
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of filtered items skipped before this page starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size.get())
    }
}

/// One page of results plus the metadata describing the full result set.
///
/// ## Invariants
/// - `total_pages == 0` if and only if `total_elements == 0`.
/// - `content.len() <= page_size`.
/// - `is_first == (page_number == 0)` and
///   `is_last == (page_number + 1 >= total_pages)`.
///
/// Serialises with camelCase keys (`totalElements`, `isFirst`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    content: Vec<T>,
    total_elements: usize,
    total_pages: usize,
    page_number: usize,
    page_size: usize,
    is_first: bool,
    is_last: bool,
}

impl<T> PageResult<T> {
    /// Build a page from its content and the size of the filtered set.
    ///
    /// Content beyond the page size is truncated so the envelope invariants
    /// hold even when a caller hands over an oversized slice.
    #[must_use]
    pub fn from_parts(mut content: Vec<T>, total_elements: usize, request: PageRequest) -> Self {
        let page_size = request.page_size();
        content.truncate(page_size);
        let total_pages = total_elements.div_ceil(page_size);
        let page_number = request.page_number();
        Self {
            content,
            total_elements,
            total_pages,
            page_number,
            page_size,
            is_first: page_number == 0,
            is_last: page_number.saturating_add(1) >= total_pages,
        }
    }

    /// Empty page for the given coordinates.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::from_parts(Vec::new(), 0, request)
    }

    /// Items on this page, in result order.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Size of the filtered result set before slicing.
    #[must_use]
    pub const fn total_elements(&self) -> usize {
        self.total_elements
    }

    /// Number of pages the filtered set spans at this page size.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Zero-based number of this page.
    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_number
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether this is the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.is_first
    }

    /// Whether no page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.is_last
    }

    /// Same metadata around different content, e.g. enriched copies of the
    /// items on this page. Excess items are truncated to the page size.
    #[must_use]
    pub fn with_content<U>(&self, mut content: Vec<U>) -> PageResult<U> {
        content.truncate(self.page_size);
        PageResult {
            content,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
            is_first: self.is_first,
            is_last: self.is_last,
        }
    }

    /// Convert every item while keeping the metadata untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_number: self.page_number,
            page_size: self.page_size,
            is_first: self.is_first,
            is_last: self.is_last,
        }
    }
}
