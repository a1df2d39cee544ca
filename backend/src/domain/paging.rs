//! Page size policy applied by every service.

use std::num::NonZeroUsize;

use pagination::PageRequest;

use super::Error;

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};
const MAX_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Default and maximum page sizes; 20 and 100 unless configured.
///
/// ## Invariants
/// - `default_size <= max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_size: NonZeroUsize,
    max_size: NonZeroUsize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PageLimits {
    /// Build limits; a default above the maximum is lowered to the maximum.
    pub fn new(default_size: usize, max_size: usize) -> Result<Self, Error> {
        let max_size = NonZeroUsize::new(max_size)
            .ok_or_else(|| Error::invalid_request("maximum page size must be positive"))?;
        let default_size = NonZeroUsize::new(default_size)
            .ok_or_else(|| Error::invalid_request("default page size must be positive"))?;
        Ok(Self {
            default_size: default_size.min(max_size),
            max_size,
        })
    }

    /// Page size used when a caller does not supply one.
    pub const fn default_size(&self) -> usize {
        self.default_size.get()
    }

    /// Largest page size a caller may receive.
    pub const fn max_size(&self) -> usize {
        self.max_size.get()
    }

    /// Build a request from raw caller input, applying the default and cap.
    pub fn request(&self, page_number: usize, page_size: Option<usize>) -> Result<PageRequest, Error> {
        let size = page_size.unwrap_or_else(|| self.default_size.get());
        Ok(self.clamp(PageRequest::new(page_number, size)?))
    }

    /// Cap an existing request at the maximum page size.
    pub fn clamp(&self, request: PageRequest) -> PageRequest {
        request.clamped(self.max_size)
    }
}
