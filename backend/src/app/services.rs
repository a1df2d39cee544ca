//! Service wiring over a chosen storage backend.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{BookRepository, ReadingListRepository, ReviewRepository, UserRepository};
use crate::domain::{
    BookService, Enricher, PageLimits, ReadingListService, ReviewService, UserService,
};
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{DbPool, DieselStore, PoolError};

use super::settings::{AppSettings, SettingsError};

/// Storage backend behind the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `DashMap` tables in this process.
    Memory,
    /// PostgreSQL through Diesel.
    Postgres,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        })
    }
}

/// Start-up failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings were rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The database pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Every service, sharing one set of repositories.
#[derive(Clone)]
pub struct Services {
    /// Book catalogue.
    pub books: BookService,
    /// Registered users.
    pub users: UserService,
    /// Reading lists.
    pub reading_lists: ReadingListService,
    /// Reviews.
    pub reviews: ReviewService,
    backend: Backend,
    limits: PageLimits,
}

struct Repositories {
    books: Arc<BookRepository>,
    users: Arc<UserRepository>,
    reading_lists: Arc<dyn ReadingListRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl Services {
    fn assemble(repos: Repositories, backend: Backend, limits: PageLimits) -> Self {
        let enricher = Enricher::new(repos.books.clone(), repos.users.clone());
        Self {
            books: BookService::new(repos.books.clone(), limits),
            users: UserService::new(repos.users, limits),
            reading_lists: ReadingListService::new(
                repos.reading_lists,
                repos.books.clone(),
                enricher.clone(),
                limits,
            ),
            reviews: ReviewService::new(repos.reviews, repos.books, enricher, limits),
            backend,
            limits,
        }
    }

    /// Services over an in-process store.
    pub fn in_memory(store: &MemoryStore, limits: PageLimits) -> Self {
        let repos = Repositories {
            books: store.books(),
            users: store.users(),
            reading_lists: store.reading_lists(),
            reviews: store.reviews(),
        };
        Self::assemble(repos, Backend::Memory, limits)
    }

    /// Services over PostgreSQL.
    pub fn postgres(store: &DieselStore, limits: PageLimits) -> Self {
        let repos = Repositories {
            books: store.books(),
            users: store.users(),
            reading_lists: store.reading_lists(),
            reviews: store.reviews(),
        };
        Self::assemble(repos, Backend::Postgres, limits)
    }

    /// Pick the backend from `settings` and wire every service.
    ///
    /// # Errors
    ///
    /// Fails on invalid page limits or when the pool cannot be built.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, StartupError> {
        let limits = settings.page_limits()?;
        let services = match settings.pool_config() {
            Some(config) => {
                let pool = DbPool::new(config).await?;
                Self::postgres(&DieselStore::new(pool), limits)
            }
            None => Self::in_memory(&MemoryStore::default(), limits),
        };
        info!(
            backend = %services.backend,
            default_page_size = limits.default_size(),
            max_page_size = limits.max_size(),
            "services ready"
        );
        Ok(services)
    }

    /// Backend in use.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Page limits applied by every service.
    pub fn limits(&self) -> PageLimits {
        self.limits
    }
}
