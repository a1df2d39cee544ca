//! Domain ports for the hexagonal boundary.
//!
//! Outbound adapters under `crate::outbound` implement these traits; the
//! services in `crate::domain` depend only on them.

mod reading_list_repository;
mod repository;
mod review_repository;

pub use reading_list_repository::ReadingListRepository;
pub use repository::{Repository, RepositoryError};
pub use review_repository::ReviewRepository;

use crate::domain::{Book, User};

/// Book storage; books need nothing beyond the generic contract.
pub type BookRepository = dyn Repository<Book>;

/// User storage; users need nothing beyond the generic contract.
pub type UserRepository = dyn Repository<User>;
