//! In-process storage backend.
//!
//! Used when no database URL is configured and by the unit tests. Every
//! aggregate table is a [`MemoryRepository`]; [`MemoryStore`] bundles the four
//! tables so services can share them.

mod memory_repository;

use std::sync::Arc;

pub use memory_repository::MemoryRepository;

use crate::domain::ports::{BookRepository, ReadingListRepository, ReviewRepository, UserRepository};
use crate::domain::{Book, ReadingList, Review, User};

/// One in-memory table per aggregate type.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    books: Arc<MemoryRepository<Book>>,
    users: Arc<MemoryRepository<User>>,
    reading_lists: Arc<MemoryRepository<ReadingList>>,
    reviews: Arc<MemoryRepository<Review>>,
}

impl MemoryStore {
    /// Book table.
    pub fn books(&self) -> Arc<BookRepository> {
        self.books.clone()
    }

    /// User table.
    pub fn users(&self) -> Arc<UserRepository> {
        self.users.clone()
    }

    /// Reading list table.
    pub fn reading_lists(&self) -> Arc<dyn ReadingListRepository> {
        self.reading_lists.clone()
    }

    /// Review table.
    pub fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }
}
