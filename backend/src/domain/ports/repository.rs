//! Generic repository contract implemented by every storage backend.
//!
//! The contract is deliberately small: CRUD by id, a batch lookup used by the
//! reference resolver, an unfiltered listing and a paged substring search.
//! Backends hand their candidate rows to the `pagination` crate in insertion
//! order so every backend returns identical pages for identical data.

use async_trait::async_trait;
use pagination::{PageRequest, PageResult, Pageable, SortSpec};

use crate::domain::{Aggregate, Error};

/// Errors raised by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Backend connection could not be established.
    #[error("repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query { message: String },
    /// The aggregate addressed by an update does not exist.
    #[error("{kind} {id} does not exist")]
    MissingAggregate { kind: &'static str, id: String },
    /// An aggregate with the same id is already stored.
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: &'static str, id: String },
}

impl RepositoryError {
    /// The backend could not be reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// A statement failed or returned data the domain rejects.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// `id` of aggregate `T` is not stored.
    pub fn missing<T: Aggregate>(id: T::Id) -> Self {
        Self::MissingAggregate {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// `id` of aggregate `T` is already stored.
    pub fn duplicate<T: Aggregate>(id: T::Id) -> Self {
        Self::DuplicateId {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Connection { .. } => Self::service_unavailable(value.to_string()),
            RepositoryError::MissingAggregate { .. } => Self::invalid_request(value.to_string()),
            RepositoryError::Query { .. } | RepositoryError::DuplicateId { .. } => {
                Self::internal(value.to_string())
            }
        }
    }
}

/// Storage contract for one aggregate type.
///
/// # Semantics
///
/// - `update` of an absent id fails with
///   [`RepositoryError::MissingAggregate`]; it never inserts.
/// - `find_by_ids` returns each stored aggregate at most once, in no
///   particular order; unknown ids are skipped.
/// - `delete_by_id` is idempotent and reports whether a row was removed.
/// - `search` treats a missing or blank query as "no results".
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Aggregate + Pageable,
{
    /// Store a new aggregate.
    async fn create(&self, aggregate: &T) -> Result<(), RepositoryError>;

    /// Apply `aggregate` to the stored copy with the same id and return the
    /// stored result.
    async fn update(&self, aggregate: &T) -> Result<T, RepositoryError>;

    /// Fetch one aggregate.
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError>;

    /// Fetch every aggregate whose id appears in `ids`.
    async fn find_by_ids(&self, ids: &[T::Id]) -> Result<Vec<T>, RepositoryError>;

    /// Remove an aggregate if present.
    async fn delete_by_id(&self, id: T::Id) -> Result<bool, RepositoryError>;

    /// Every aggregate, sorted by `sort` when it names a known field, then
    /// truncated to `limit`.
    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<T>, RepositoryError>;

    /// Case-insensitive substring search over the aggregate's designated
    /// fields.
    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<T>, RepositoryError>;
}
