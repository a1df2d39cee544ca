//! `DashMap`-backed implementation of the repository ports.
//!
//! Each row carries the sequence number it was inserted with. Reads that
//! return several rows sort by that sequence so callers see insertion order,
//! which is what the shared paginator expects. Single-row mutations run
//! under the row's shard lock and never interleave with each other.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use pagination::{PageRequest, PageResult, Pageable, SortSpec, search, sort_and_limit};
use tracing::debug;

use crate::domain::ports::{ReadingListRepository, Repository, RepositoryError, ReviewRepository};
use crate::domain::{Aggregate, BookId, ReadingList, ReadingListId, Review, UserId};

#[derive(Debug)]
struct Stored<T> {
    seq: u64,
    value: T,
}

/// In-process repository for one aggregate type.
#[derive(Debug)]
pub struct MemoryRepository<T: Aggregate> {
    rows: DashMap<T::Id, Stored<T>>,
    next_seq: AtomicU64,
}

impl<T: Aggregate> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Aggregate> MemoryRepository<T> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Number of stored aggregates.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clone every row matching `keep`, in insertion order.
    fn snapshot_where(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|entry| keep(&entry.value().value))
            .map(|entry| (entry.value().seq, entry.value().value.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, value)| value).collect()
    }

    fn snapshot(&self) -> Vec<T> {
        self.snapshot_where(|_| true)
    }

    /// Run `change` against the stored row while holding its shard lock.
    fn modify<R>(&self, id: T::Id, change: impl FnOnce(&mut T) -> R) -> Result<R, RepositoryError> {
        let mut entry = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::missing::<T>(id))?;
        Ok(change(&mut entry.value_mut().value))
    }
}

#[async_trait]
impl<T> Repository<T> for MemoryRepository<T>
where
    T: Aggregate + Pageable,
{
    async fn create(&self, aggregate: &T) -> Result<(), RepositoryError> {
        let id = aggregate.id();
        match self.rows.entry(id) {
            Entry::Occupied(_) => Err(RepositoryError::duplicate::<T>(id)),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Stored {
                    seq,
                    value: aggregate.clone(),
                });
                debug!(kind = T::KIND, %id, seq, "memory row inserted");
                Ok(())
            }
        }
    }

    async fn update(&self, aggregate: &T) -> Result<T, RepositoryError> {
        self.modify(aggregate.id(), |stored| {
            stored.apply_update(aggregate);
            stored.clone()
        })
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        Ok(self.rows.get(&id).map(|entry| entry.value().value.clone()))
    }

    async fn find_by_ids(&self, ids: &[T::Id]) -> Result<Vec<T>, RepositoryError> {
        let mut seen = HashSet::with_capacity(ids.len());
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.rows.get(id).map(|entry| entry.value().value.clone()))
            .collect())
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<bool, RepositoryError> {
        Ok(self.rows.remove(&id).is_some())
    }

    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<T>, RepositoryError> {
        Ok(sort_and_limit(self.snapshot(), sort, limit))
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<T>, RepositoryError> {
        Ok(search(self.snapshot(), query, sort, request))
    }
}

#[async_trait]
impl ReadingListRepository for MemoryRepository<ReadingList> {
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<ReadingList>, RepositoryError> {
        Ok(self.snapshot_where(|list| list.owner_id == owner_id))
    }

    async fn add_book(
        &self,
        list_id: ReadingListId,
        book_id: BookId,
    ) -> Result<bool, RepositoryError> {
        self.modify(list_id, |list| list.add_book(book_id))
    }

    async fn remove_book(
        &self,
        list_id: ReadingListId,
        book_id: BookId,
    ) -> Result<bool, RepositoryError> {
        self.modify(list_id, |list| list.remove_book(book_id))
    }
}

#[async_trait]
impl ReviewRepository for MemoryRepository<Review> {
    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.snapshot_where(|review| review.book.id() == book_id))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.snapshot_where(|review| review.owner_id == owner_id))
    }
}
