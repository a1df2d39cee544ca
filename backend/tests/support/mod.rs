//! Shared helpers for the integration suites.
//!
//! Each suite under `tests/` compiles as its own crate and pulls in this
//! module with `mod support;`, so not every suite uses every helper.
#![allow(dead_code, reason = "each suite uses a different subset")]

pub mod cluster_skip;
pub mod conformance;
pub mod doubles;
pub mod embedded_postgres;
pub mod fixtures;

use std::sync::Arc;

use bookshelf::domain::ports::{BookRepository, ReadingListRepository, ReviewRepository, UserRepository};
use bookshelf::outbound::memory::MemoryStore;
use bookshelf::outbound::persistence::DieselStore;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{migrate_schema, reset_database, unique_database_name};

/// One repository per aggregate, all from the same backend.
#[derive(Clone)]
pub struct Repos {
    pub books: Arc<BookRepository>,
    pub users: Arc<UserRepository>,
    pub reading_lists: Arc<dyn ReadingListRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repos {
    /// Fresh in-process repositories.
    pub fn memory() -> Self {
        let store = MemoryStore::default();
        Self {
            books: store.books(),
            users: store.users(),
            reading_lists: store.reading_lists(),
            reviews: store.reviews(),
        }
    }

    /// Diesel repositories sharing `store`'s pool.
    pub fn diesel(store: &DieselStore) -> Self {
        Self {
            books: store.books(),
            users: store.users(),
            reading_lists: store.reading_lists(),
            reviews: store.reviews(),
        }
    }
}

/// Render a `postgres` error with its SQLSTATE, detail and hint.
///
/// `Display` on `postgres::Error` often collapses to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
