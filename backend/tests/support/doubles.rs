//! Repository wrappers that count or inject failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bookshelf::domain::ports::{ReadingListRepository, Repository, RepositoryError};
use bookshelf::domain::{Aggregate, BookId, ReadingList, ReadingListId, UserId};
use pagination::{PageRequest, PageResult, Pageable, SortSpec};

/// Delegates to an inner repository and counts batch lookups.
pub struct CountingRepository<T: Aggregate + Pageable> {
    inner: Arc<dyn Repository<T>>,
    batch_lookups: AtomicUsize,
    requested_ids: AtomicUsize,
}

impl<T: Aggregate + Pageable> CountingRepository<T> {
    pub fn new(inner: Arc<dyn Repository<T>>) -> Self {
        Self {
            inner,
            batch_lookups: AtomicUsize::new(0),
            requested_ids: AtomicUsize::new(0),
        }
    }

    /// Number of `find_by_ids` calls so far.
    pub fn batch_lookups(&self) -> usize {
        self.batch_lookups.load(Ordering::SeqCst)
    }

    /// Ids passed to `find_by_ids` so far, summed over calls.
    pub fn requested_ids(&self) -> usize {
        self.requested_ids.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Aggregate + Pageable> Repository<T> for CountingRepository<T> {
    async fn create(&self, aggregate: &T) -> Result<(), RepositoryError> {
        self.inner.create(aggregate).await
    }

    async fn update(&self, aggregate: &T) -> Result<T, RepositoryError> {
        self.inner.update(aggregate).await
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[T::Id]) -> Result<Vec<T>, RepositoryError> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        self.requested_ids.fetch_add(ids.len(), Ordering::SeqCst);
        self.inner.find_by_ids(ids).await
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<bool, RepositoryError> {
        self.inner.delete_by_id(id).await
    }

    async fn list(&self, sort: Option<&SortSpec>, limit: Option<usize>) -> Result<Vec<T>, RepositoryError> {
        self.inner.list(sort, limit).await
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<T>, RepositoryError> {
        self.inner.search(query, sort, request).await
    }
}

/// Reading list repository whose `add_book` fails while armed.
pub struct FlakyReadingLists {
    inner: Arc<dyn ReadingListRepository>,
    fail_adds: AtomicBool,
}

impl FlakyReadingLists {
    pub fn new(inner: Arc<dyn ReadingListRepository>) -> Self {
        Self {
            inner,
            fail_adds: AtomicBool::new(false),
        }
    }

    /// Make every following `add_book` fail with a connection error.
    pub fn fail_adds(&self) {
        self.fail_adds.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Repository<ReadingList> for FlakyReadingLists {
    async fn create(&self, list: &ReadingList) -> Result<(), RepositoryError> {
        self.inner.create(list).await
    }

    async fn update(&self, list: &ReadingList) -> Result<ReadingList, RepositoryError> {
        self.inner.update(list).await
    }

    async fn find_by_id(&self, id: ReadingListId) -> Result<Option<ReadingList>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[ReadingListId]) -> Result<Vec<ReadingList>, RepositoryError> {
        self.inner.find_by_ids(ids).await
    }

    async fn delete_by_id(&self, id: ReadingListId) -> Result<bool, RepositoryError> {
        self.inner.delete_by_id(id).await
    }

    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingList>, RepositoryError> {
        self.inner.list(sort, limit).await
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<ReadingList>, RepositoryError> {
        self.inner.search(query, sort, request).await
    }
}

#[async_trait]
impl ReadingListRepository for FlakyReadingLists {
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<ReadingList>, RepositoryError> {
        self.inner.find_by_owner(owner_id).await
    }

    async fn add_book(&self, list_id: ReadingListId, book_id: BookId) -> Result<bool, RepositoryError> {
        if self.fail_adds.load(Ordering::SeqCst) {
            return Err(RepositoryError::connection("injected add_book failure"));
        }
        self.inner.add_book(list_id, book_id).await
    }

    async fn remove_book(&self, list_id: ReadingListId, book_id: BookId) -> Result<bool, RepositoryError> {
        self.inner.remove_book(list_id, book_id).await
    }
}
