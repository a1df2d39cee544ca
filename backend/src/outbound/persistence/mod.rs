//! PostgreSQL storage backend built on Diesel.
//!
//! Repositories translate between row structs (`models.rs`) and domain
//! aggregates and hold no business logic. Candidate rows are loaded in
//! insertion order and handed to the `pagination` crate, so sorting and
//! paging match the in-process backend exactly. Search matching also runs in
//! Rust, never in SQL, so results do not depend on the database collation.

pub(crate) mod diesel_helpers;
mod diesel_book_repository;
mod diesel_reading_list_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

use std::sync::Arc;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_reading_list_repository::DieselReadingListRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

use crate::domain::ports::{BookRepository, ReadingListRepository, ReviewRepository, UserRepository};

/// The four Diesel repositories over one shared pool.
#[derive(Debug, Clone)]
pub struct DieselStore {
    pool: DbPool,
}

impl DieselStore {
    /// Bundle repositories over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Book table.
    pub fn books(&self) -> Arc<BookRepository> {
        Arc::new(DieselBookRepository::new(self.pool.clone()))
    }

    /// User table.
    pub fn users(&self) -> Arc<UserRepository> {
        Arc::new(DieselUserRepository::new(self.pool.clone()))
    }

    /// Reading list tables.
    pub fn reading_lists(&self) -> Arc<dyn ReadingListRepository> {
        Arc::new(DieselReadingListRepository::new(self.pool.clone()))
    }

    /// Review table.
    pub fn reviews(&self) -> Arc<dyn ReviewRepository> {
        Arc::new(DieselReviewRepository::new(self.pool.clone()))
    }
}
