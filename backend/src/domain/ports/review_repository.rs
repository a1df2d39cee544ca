//! Port for review persistence.

use async_trait::async_trait;

use crate::domain::{BookId, Review, UserId};

use super::{Repository, RepositoryError};

/// Review storage with lookups by book and by author.
#[async_trait]
pub trait ReviewRepository: Repository<Review> {
    /// Every review of `book_id`, in insertion order.
    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError>;

    /// Every review written by `owner_id`, in insertion order.
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Review>, RepositoryError>;
}
