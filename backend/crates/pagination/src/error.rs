//! Errors raised by the strict pagination entry points.
//!
//! The lenient paths (`paginate`, `search`, `sort_items`) never fail; these
//! errors only surface from constructors and explicit validation calls.

/// Validation failures for page requests and sort specifications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size must be strictly positive.
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    /// Sort order token was neither `asc` nor `desc`.
    #[error("unknown sort order `{value}`; expected `asc` or `desc`")]
    InvalidSortOrder {
        /// Raw token supplied by the caller.
        value: String,
    },
    /// Sort field is not part of the aggregate's whitelist.
    #[error("unknown sort field `{field}`; allowed fields: {allowed}")]
    UnknownSortField {
        /// Field name supplied by the caller.
        field: String,
        /// Comma separated list of whitelisted field names.
        allowed: String,
    },
}
