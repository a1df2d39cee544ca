//! Port for reading list persistence.

use async_trait::async_trait;

use crate::domain::{BookId, ReadingList, ReadingListId, UserId};

use super::{Repository, RepositoryError};

/// Reading list storage with atomic membership operations.
///
/// `update` from [`Repository`] only changes the list's own fields; book
/// membership changes go through [`add_book`](Self::add_book) and
/// [`remove_book`](Self::remove_book), so an update never drops a book added
/// concurrently.
#[async_trait]
pub trait ReadingListRepository: Repository<ReadingList> {
    /// Every list owned by `owner_id`, in insertion order.
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<ReadingList>, RepositoryError>;

    /// Append `book_id` to the list unless it is already present.
    ///
    /// Returns `true` when the book was added and `false` when it was already
    /// on the list. Fails with [`RepositoryError::MissingAggregate`] when the
    /// list does not exist.
    async fn add_book(
        &self,
        list_id: ReadingListId,
        book_id: BookId,
    ) -> Result<bool, RepositoryError>;

    /// Remove `book_id` from the list.
    ///
    /// Returns whether the book was present. Fails with
    /// [`RepositoryError::MissingAggregate`] when the list does not exist.
    async fn remove_book(
        &self,
        list_id: ReadingListId,
        book_id: BookId,
    ) -> Result<bool, RepositoryError>;
}
